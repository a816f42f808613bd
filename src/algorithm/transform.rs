use serde::Serialize;
use tracing::{debug, warn};

use crate::algorithm::classify::{classify, display_code, round_units};
use crate::algorithm::index::ElementIndex;
use crate::algorithm::prereqs::PrerequisiteGraph;
use crate::algorithm::semester::semester_slot;
use crate::error::{Error, Result};
use crate::models::{CourseRecord, PathwayElement, PathwayMap, ProgramRecord};

/// Institución usada en la descripción del programa si no se configura otra
pub const DEFAULT_INSTITUTION: &str = "Merced College";

/// Referencia a un prerequisito que no existe en el índice y se omitió
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedReference {
    pub element_id: String,
    pub missing_id: String,
}

/// Lo que la transformación descartó sin fallar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformReport {
    pub dropped_references: Vec<DroppedReference>,
    pub ignored_associations: usize,
}

impl TransformReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_references.is_empty() && self.ignored_associations == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub program: ProgramRecord,
    /// Mismo orden que `pathwayElements`
    pub courses: Vec<CourseRecord>,
    pub report: TransformReport,
}

impl Transformed {
    pub fn into_parts(self) -> (ProgramRecord, Vec<CourseRecord>) {
        (self.program, self.courses)
    }
}

/// Transforma mapas de pathway en un programa y sus cursos. Cada llamada
/// construye su propio índice y grafo; no hay estado compartido.
#[derive(Debug, Clone)]
pub struct Transformer {
    institution: String,
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::new(DEFAULT_INSTITUTION)
    }
}

impl Transformer {
    pub fn new(institution: impl Into<String>) -> Transformer {
        Transformer { institution: institution.into() }
    }

    pub fn institution(&self) -> &str {
        &self.institution
    }

    pub fn transform(&self, map: &PathwayMap) -> Transformed {
        let elements = map.pathway_elements.as_slice();
        let index = ElementIndex::build(elements);
        let graph = PrerequisiteGraph::resolve(elements);

        let report = TransformReport {
            dropped_references: dangling_references(&graph, &index),
            ignored_associations: graph.ignored_associations(),
        };

        let courses: Vec<CourseRecord> = elements
            .iter()
            .map(|element| assemble_course(element, &index, &graph))
            .collect();

        let program = ProgramRecord {
            name: format!("{} - {}", map.program_id, map.program_title),
            description: Some(format!("{} {} program", self.institution, map.program_title)),
            total_units: total_units(elements),
        };

        if !report.dropped_references.is_empty() {
            let missing: Vec<&str> = report.dropped_references.iter().map(|d| d.missing_id.as_str()).collect();
            warn!(
                program = %map.program_id,
                dropped = report.dropped_references.len(),
                missing = ?missing,
                "asociaciones apuntan a elementos inexistentes; se omiten"
            );
        }
        debug!(
            program = %map.program_id,
            elements = elements.len(),
            edges = graph.edge_count(),
            total_units = program.total_units,
            ignored_associations = report.ignored_associations,
            "mapa transformado"
        );

        Transformed { program, courses, report }
    }

    pub fn transform_json(&self, json: &str) -> Result<Transformed> {
        let map = parse_pathway_map(json)?;
        Ok(self.transform(&map))
    }
}

/// Parsea el documento de entrada. Cualquier problema estructural (campos
/// faltantes, listas que no son listas, variantes desconocidas) es fatal.
pub fn parse_pathway_map(json: &str) -> Result<PathwayMap> {
    serde_json::from_str::<PathwayMap>(json)
        .map_err(|e| Error::InvalidInput(format!("invalid pathway map: {}", e)))
}

/// Atajo con la institución por defecto
pub fn transform(map: &PathwayMap) -> Transformed {
    Transformer::default().transform(map)
}

pub fn transform_json(json: &str) -> Result<Transformed> {
    Transformer::default().transform_json(json)
}

/// Suma de las unidades mínimas de todos los elementos (course y choice),
/// redondeada una sola vez al final. No usa las unidades visibles por curso,
/// así que el total puede no coincidir con la suma de las tarjetas.
pub fn total_units(elements: &[PathwayElement]) -> i64 {
    let sum: f64 = elements
        .iter()
        .map(|e| e.recommended_opportunity.min_units())
        .sum();
    round_units(sum)
}

/// Asociaciones con un extremo fuera del índice, una por arista.
/// `REQUIRES` deja el id ausente como prerequisito; `REQUIREMENT_OF` lo deja
/// como dependiente, y ningún registro de salida lo leería.
fn dangling_references(graph: &PrerequisiteGraph<'_>, index: &ElementIndex<'_>) -> Vec<DroppedReference> {
    graph
        .edges()
        .filter_map(|(dependent, prerequisite)| {
            let (element_id, missing_id) = if !index.contains(prerequisite) {
                (dependent, prerequisite)
            } else if !index.contains(dependent) {
                (prerequisite, dependent)
            } else {
                return None;
            };
            Some(DroppedReference { element_id: element_id.to_string(), missing_id: missing_id.to_string() })
        })
        .collect()
}

fn assemble_course<'a>(
    element: &'a PathwayElement,
    index: &ElementIndex<'a>,
    graph: &PrerequisiteGraph<'a>,
) -> CourseRecord {
    let display = classify(element);
    let slot = semester_slot(element.recommended_opportunity.term());

    // ids -> códigos visibles; dos elementos con el mismo código colapsan en uno
    let mut prerequisites: Vec<String> = Vec::new();
    for prereq_id in graph.prerequisites_of(element.id.as_str()) {
        // los ausentes ya quedaron en el reporte
        if let Some(prereq) = index.get(prereq_id) {
            let code = display_code(prereq);
            if !prerequisites.iter().any(|c| c == code) {
                prerequisites.push(code.to_string());
            }
        }
    }

    CourseRecord {
        program_id: String::new(),
        code: display.code.to_string(),
        title: display.title.to_string(),
        units: display.units,
        description: display.description.map(str::to_string),
        prerequisites: if prerequisites.is_empty() { None } else { Some(prerequisites) },
        semester: slot.label,
        semester_order: slot.order,
        requirement_type: element.requirement.requirement_type.clone(),
        is_choice: display.is_choice,
        choice_description: display.choice_description.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = r#"{
        "programId": "CS-AS",
        "programTitle": "Computer Science",
        "pathwayElements": [
            {
                "id": "a", "name": "A", "shortDescription": "Intro",
                "requirement": {"requirementType": "Major Requirement"},
                "recommendedOpportunity": {
                    "type": "COURSE", "courseCode": "CS101",
                    "term": {"customLabel": "Fall", "termNumber": 1, "year": 1},
                    "minUnits": 3, "maxUnits": 3
                },
                "elementAssociations": []
            },
            {
                "id": "b", "name": "B", "shortDescription": "Next",
                "requirement": {"requirementType": "Major Requirement"},
                "recommendedOpportunity": {
                    "type": "COURSE", "courseCode": "CS102",
                    "term": {"customLabel": "Spring", "termNumber": 2, "year": 1},
                    "minUnits": 3, "maxUnits": 4
                },
                "elementAssociations": [
                    {"type": "REQUIRES", "elementId": "b", "associatedElementId": "a"},
                    {"type": "REQUIRES", "elementId": "b", "associatedElementId": "missing"}
                ]
            }
        ]
    }"#;

    #[test]
    fn programa_y_cursos_basicos() {
        let out = transform_json(SMALL_MAP).expect("debe transformar");
        assert_eq!(out.program.name, "CS-AS - Computer Science");
        assert_eq!(out.program.description.as_deref(), Some("Merced College Computer Science program"));
        assert_eq!(out.program.total_units, 6);
        assert_eq!(out.courses.len(), 2);
        assert_eq!(out.courses[0].prerequisites, None);
        assert_eq!(out.courses[1].prerequisites, Some(vec!["CS101".to_string()]));
        assert_eq!(out.courses[1].units, 4);
        assert!(out.courses.iter().all(|c| c.program_id.is_empty()));
    }

    #[test]
    fn referencias_colgantes_quedan_en_el_reporte() {
        let out = transform_json(SMALL_MAP).expect("debe transformar");
        assert_eq!(
            out.report.dropped_references,
            vec![DroppedReference { element_id: "b".to_string(), missing_id: "missing".to_string() }]
        );
        assert!(!out.report.is_clean());
    }

    #[test]
    fn requirement_of_hacia_id_ausente_queda_en_el_reporte() {
        let json = r#"{
            "programId": "X", "programTitle": "Y",
            "pathwayElements": [{
                "id": "a", "name": "A", "shortDescription": "",
                "requirement": {"requirementType": "Major"},
                "recommendedOpportunity": {
                    "type": "COURSE", "courseCode": "A1",
                    "term": {"customLabel": "Fall", "termNumber": 1}, "minUnits": 3
                },
                "elementAssociations": [
                    {"type": "REQUIREMENT_OF", "elementId": "a", "associatedElementId": "ghost"}
                ]
            }]
        }"#;
        let out = transform_json(json).expect("debe transformar");
        assert_eq!(
            out.report.dropped_references,
            vec![DroppedReference { element_id: "a".to_string(), missing_id: "ghost".to_string() }]
        );
        assert!(!out.report.is_clean());
        assert_eq!(out.courses[0].prerequisites, None);
    }

    #[test]
    fn ids_duplicados_no_repiten_descartes() {
        let json = r#"{
            "programId": "X", "programTitle": "Y",
            "pathwayElements": [
                {
                    "id": "dup", "name": "D1", "shortDescription": "",
                    "requirement": {"requirementType": "Major"},
                    "recommendedOpportunity": {
                        "type": "COURSE", "term": {"customLabel": "Fall", "termNumber": 1}, "minUnits": 3
                    },
                    "elementAssociations": [
                        {"type": "REQUIRES", "elementId": "dup", "associatedElementId": "missing"}
                    ]
                },
                {
                    "id": "dup", "name": "D2", "shortDescription": "",
                    "requirement": {"requirementType": "Major"},
                    "recommendedOpportunity": {
                        "type": "COURSE", "term": {"customLabel": "Spring", "termNumber": 2}, "minUnits": 3
                    },
                    "elementAssociations": [
                        {"type": "REQUIRES", "elementId": "dup", "associatedElementId": "missing"}
                    ]
                }
            ]
        }"#;
        let out = transform_json(json).expect("debe transformar");
        assert_eq!(out.courses.len(), 2);
        assert_eq!(
            out.report.dropped_references,
            vec![DroppedReference { element_id: "dup".to_string(), missing_id: "missing".to_string() }]
        );
    }

    #[test]
    fn institucion_configurable() {
        let out = Transformer::new("Fresno City College")
            .transform_json(SMALL_MAP)
            .expect("debe transformar");
        assert_eq!(out.program.description.as_deref(), Some("Fresno City College Computer Science program"));
    }

    #[test]
    fn entrada_invalida_es_fatal() {
        let err = transform_json(r#"{"programId": "X", "programTitle": "Y", "pathwayElements": {}}"#)
            .expect_err("pathwayElements no es lista");
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = transform_json(r#"{"programId": "X", "programTitle": "Y"}"#).expect_err("falta la lista");
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
