// Biblioteca raíz del crate `pathway_mapper`.
// Transforma mapas de pathway de terceros en un programa y sus cursos
// normalizados, los persiste y los expone por HTTP junto al asistente.
pub mod algorithm;
pub mod assistant;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod server;
pub mod storage;

pub use algorithm::{transform, transform_json, Transformed, Transformer};
pub use error::{Error, Result};
/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
