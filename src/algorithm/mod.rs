// Módulo de alto nivel para la transformación de mapas de pathway.
// Etapas: índice -> grafo de prerequisitos -> clasificación -> semestre -> ensamblado
pub mod classify;
pub mod index;
pub mod prereqs;
pub mod semester;
pub mod transform;

// Reexportar sólo la API pública que usan `loader`, `server` y los tests
pub use classify::{classify, display_code, ElementDisplay};
pub use index::ElementIndex;
pub use prereqs::PrerequisiteGraph;
pub use semester::{semester_label, semester_slot, SemesterSlot};
pub use transform::{
    parse_pathway_map,
    total_units,
    transform,
    transform_json,
    DroppedReference,
    TransformReport,
    Transformed,
    Transformer,
    DEFAULT_INSTITUTION,
};
