// Estructuras del documento de entrada (mapa de pathway de terceros)
use serde::{Deserialize, Serialize};

/// Documento completo tal como lo entrega el proveedor del mapa curricular.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "programMapId": "pm-1",
///   "programId": "CSCI-COA",
///   "programTitle": "Computer Science",
///   "pathwayElements": [ { "id": "e1", "name": "CS101", ... } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayMap {
    pub program_map_id: Option<String>,
    pub program_id: String,
    pub program_title: String,
    pub program_award: Option<String>,
    pub terms_to_completion: Option<u32>,
    pub pathway_elements: Vec<PathwayElement>,
}

/// Un slot del mapa: curso concreto o elección
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayElement {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub requirement: Requirement,
    pub recommended_opportunity: Opportunity,
    #[serde(default)]
    pub element_associations: Vec<ElementAssociation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Texto libre ("Major Requirement", "GE", ...); se copia tal cual a la salida
    pub requirement_type: String,
}

/// Oportunidad recomendada. Las unidades significan cosas distintas según la
/// variante: en `Course` son las del curso, en `Choice` son las que el
/// estudiante debe cubrir con esa elección.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Opportunity {
    #[serde(rename_all = "camelCase")]
    Course {
        term: Term,
        course_code: Option<String>,
        course_name: Option<String>,
        description: Option<String>,
        min_units: f64,
        max_units: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Choice {
        term: Term,
        name: Option<String>,
        description: Option<String>,
        min_units: f64,
        max_units: Option<f64>,
    },
}

impl Opportunity {
    pub fn term(&self) -> &Term {
        match self {
            Opportunity::Course { term, .. } | Opportunity::Choice { term, .. } => term,
        }
    }

    /// Unidades mínimas de la oportunidad, sin importar la variante.
    /// Es el valor que suma el total del programa.
    pub fn min_units(&self) -> f64 {
        match self {
            Opportunity::Course { min_units, .. } | Opportunity::Choice { min_units, .. } => *min_units,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Opportunity::Choice { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub custom_label: String,
    /// 1-based
    pub term_number: u32,
    pub year: Option<i32>,
}

/// Arista entre dos elementos. El tag se conserva como texto libre; ver
/// `AssociationKind::parse` para los valores reconocidos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAssociation {
    pub element_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub associated_element_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    /// El elemento dueño depende del elemento asociado
    Requires,
    /// El elemento asociado depende del elemento dueño
    RequirementOf,
}

impl AssociationKind {
    pub fn parse(tag: &str) -> Option<AssociationKind> {
        match tag {
            "REQUIRES" => Some(AssociationKind::Requires),
            "REQUIREMENT_OF" => Some(AssociationKind::RequirementOf),
            _ => None,
        }
    }
}

impl ElementAssociation {
    pub fn association_kind(&self) -> Option<AssociationKind> {
        AssociationKind::parse(&self.kind)
    }
}
