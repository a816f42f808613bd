//! Tipos de error comunes del crate.

use thiserror::Error;

/// Resultado estándar de las operaciones del crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Documento de entrada estructuralmente inválido (campos faltantes, listas mal formadas)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Variable de entorno con valor no interpretable
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Lock envenenado u otro fallo interno del almacenamiento
    #[error("Internal error: {0}")]
    Internal(String),
}
