//! Configuración del servicio leída desde variables de entorno (y `.env` si existe).
//!
//! | Variable               | Default                       |
//! |------------------------|-------------------------------|
//! | `PATHWAY_BIND_ADDR`    | `127.0.0.1:8080`              |
//! | `PATHWAY_FILE`         | (ninguno)                     |
//! | `PATHWAY_DB_PATH`      | (ninguno: storage en memoria) |
//! | `PATHWAY_INSTITUTION`  | `Merced College`              |
//! | `OPENAI_API_KEY`       | (ninguno: asistente apagado)  |
//! | `ASSISTANT_MODEL`      | `gpt-5`                       |
//! | `ASSISTANT_BASE_URL`   | `https://api.openai.com/v1`   |
//! | `ASSISTANT_MAX_TOKENS` | `2048`                        |

use std::env;
use std::path::PathBuf;

use crate::algorithm::DEFAULT_INSTITUTION;
use crate::error::{Error, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-5";
pub const DEFAULT_ASSISTANT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ASSISTANT_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    /// Mapa de pathway a importar al arrancar
    pub pathway_file: Option<PathBuf>,
    /// Si está presente se usa SQLite; si no, almacenamiento en memoria
    pub db_path: Option<PathBuf>,
    pub institution: String,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            api_key: None,
            model: DEFAULT_ASSISTANT_MODEL.to_string(),
            base_url: DEFAULT_ASSISTANT_BASE_URL.to_string(),
            max_tokens: DEFAULT_ASSISTANT_MAX_TOKENS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            pathway_file: None,
            db_path: None,
            institution: DEFAULT_INSTITUTION.to_string(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl Config {
    /// Carga `.env` (si existe) y luego lee el entorno del proceso
    pub fn from_env() -> Result<Config> {
        let _ = dotenv::dotenv();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Versión parametrizable para pruebas: recibe la función que resuelve
    /// cada variable, así no hace falta tocar el entorno real.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        // valores vacíos cuentan como ausentes
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let max_tokens = match get("ASSISTANT_MAX_TOKENS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                Error::Config(format!("ASSISTANT_MAX_TOKENS '{}' is not a number: {}", raw, e))
            })?,
            None => DEFAULT_ASSISTANT_MAX_TOKENS,
        };

        Ok(Config {
            bind_addr: get("PATHWAY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            pathway_file: get("PATHWAY_FILE").map(PathBuf::from),
            db_path: get("PATHWAY_DB_PATH").map(PathBuf::from),
            institution: get("PATHWAY_INSTITUTION").unwrap_or_else(|| DEFAULT_INSTITUTION.to_string()),
            assistant: AssistantConfig {
                api_key: get("OPENAI_API_KEY"),
                model: get("ASSISTANT_MODEL").unwrap_or_else(|| DEFAULT_ASSISTANT_MODEL.to_string()),
                base_url: get("ASSISTANT_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_ASSISTANT_BASE_URL.to_string()),
                max_tokens,
            },
        })
    }
}
