// --- Pathway Mapper - Archivo principal ---

use std::sync::Arc;

use pathway_mapper::assistant::Assistant;
use pathway_mapper::config::Config;
use pathway_mapper::loader::import_pathway_file;
use pathway_mapper::server::AppState;
use pathway_mapper::storage::{MemStorage, SqliteStorage, Storage};
use pathway_mapper::{run_server, Transformer};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("=== Pathway Mapper (API) v{} ===", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuración inválida: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    let storage: Arc<dyn Storage> = match &config.db_path {
        Some(path) => match SqliteStorage::open(path) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                error!("no se pudo abrir la base '{}': {}", path.display(), e);
                return Err(std::io::Error::other(e.to_string()));
            }
        },
        None => Arc::new(MemStorage::new()),
    };

    // Un fallo al importar no impide levantar la API: queda sin programas
    if let Some(path) = &config.pathway_file {
        let transformer = Transformer::new(config.institution.clone());
        match import_pathway_file(path, storage.as_ref(), &transformer) {
            Ok(summary) => info!(
                "importado '{}' ({} cursos, {} unidades)",
                summary.program.name,
                summary.courses.len(),
                summary.program.total_units
            ),
            Err(e) => error!("no se pudo importar '{}': {}", path.display(), e),
        }
    } else {
        warn!("PATHWAY_FILE no definido; la API arranca sin programas");
    }

    let assistant = match Assistant::new(config.assistant.clone()) {
        Ok(a) => a,
        Err(e) => return Err(std::io::Error::other(e.to_string())),
    };
    if !assistant.is_configured() {
        warn!("OPENAI_API_KEY no definido; el chat responderá con mensajes de fallback");
    }

    info!("Iniciando servidor en http://{}", config.bind_addr);
    run_server(&config.bind_addr, AppState::new(storage, assistant)).await
}
