// Carga de un mapa de pathway desde disco y persistencia del resultado
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::algorithm::{parse_pathway_map, TransformReport, Transformer};
use crate::error::{Error, Result};
use crate::models::{Course, PathwayMap, Program};
use crate::storage::Storage;

/// Resultado de importar un mapa: lo persistido más el reporte de la transformación
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub program: Program,
    pub courses: Vec<Course>,
    pub report: TransformReport,
}

pub fn read_pathway_file<P: AsRef<Path>>(path: P) -> Result<PathwayMap> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(format!("pathway file '{}'", path.display()))
        } else {
            Error::Io(e)
        }
    })?;
    parse_pathway_map(&text)
}

/// Transforma un mapa ya parseado y lo guarda: primero el programa, luego los
/// cursos con el id del programa completado.
pub fn import_pathway_map(
    map: &PathwayMap,
    storage: &dyn Storage,
    transformer: &Transformer,
) -> Result<ImportSummary> {
    let transformed = transformer.transform(map);
    let report = transformed.report.clone();
    let (program_record, course_records) = transformed.into_parts();

    let program = storage.create_program(program_record)?;
    let course_records = course_records
        .into_iter()
        .map(|mut c| {
            c.program_id = program.id.clone();
            c
        })
        .collect();
    let courses = storage.create_courses(course_records)?;

    if !report.is_clean() {
        warn!(
            program = %program.name,
            dropped_references = report.dropped_references.len(),
            ignored_associations = report.ignored_associations,
            "importación con datos descartados"
        );
    }
    info!(program = %program.name, id = %program.id, courses = courses.len(), total_units = program.total_units, "programa importado");

    Ok(ImportSummary { program, courses, report })
}

pub fn import_pathway_file<P: AsRef<Path>>(
    path: P,
    storage: &dyn Storage,
    transformer: &Transformer,
) -> Result<ImportSummary> {
    let map = read_pathway_file(path)?;
    import_pathway_map(&map, storage, transformer)
}
