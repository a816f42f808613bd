// Registros normalizados de salida y sus versiones persistidas
use serde::{Deserialize, Serialize};

/// Registro de programa producido por la transformación (sin id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
    pub name: String,
    pub description: Option<String>,
    pub total_units: i64,
}

/// Registro por elemento, listo para guardar. `program_id` queda vacío: lo
/// completa quien persiste el programa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub program_id: String,
    pub code: String,
    pub title: String,
    pub units: i64,
    pub description: Option<String>,
    /// Códigos visibles de los prerequisitos; `None` en vez de lista vacía
    pub prerequisites: Option<Vec<String>>,
    pub semester: String,
    pub semester_order: u32,
    pub requirement_type: String,
    pub is_choice: bool,
    pub choice_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub total_units: i64,
}

impl Program {
    pub fn from_record(id: String, record: ProgramRecord) -> Program {
        Program {
            id,
            name: record.name,
            description: record.description,
            total_units: record.total_units,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub program_id: String,
    pub code: String,
    pub title: String,
    pub units: i64,
    pub description: Option<String>,
    pub prerequisites: Option<Vec<String>>,
    pub semester: String,
    pub semester_order: u32,
    pub requirement_type: String,
    pub is_choice: bool,
    pub choice_description: Option<String>,
}

impl Course {
    pub fn from_record(id: String, record: CourseRecord) -> Course {
        Course {
            id,
            program_id: record.program_id,
            code: record.code,
            title: record.title,
            units: record.units,
            description: record.description,
            prerequisites: record.prerequisites,
            semester: record.semester,
            semester_order: record.semester_order,
            requirement_type: record.requirement_type,
            is_choice: record.is_choice,
            choice_description: record.choice_description,
        }
    }
}
