use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::assistant::{Assistant, ChatTurn};
use crate::error::Result;
use crate::models::{Course, Program};
use crate::storage::Storage;

/// Estado compartido por todos los workers de actix
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, assistant: Assistant) -> AppState {
        AppState { storage, assistant: Arc::new(assistant) }
    }
}

#[derive(Serialize)]
struct ProgramWithCourses {
    program: Program,
    courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    course_context: Option<Course>,
    /// Turnos previos; el servidor no guarda conversaciones
    #[serde(default)]
    history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    reply: String,
    is_error: bool,
}

fn with_courses(storage: &dyn Storage, program: Program) -> Result<ProgramWithCourses> {
    let courses = storage.courses_by_program(&program.id)?;
    Ok(ProgramWithCourses { program, courses })
}

/// GET /api/programs
async fn programs_handler(state: web::Data<AppState>) -> impl Responder {
    match state.storage.all_programs() {
        Ok(programs) => HttpResponse::Ok().json(programs),
        Err(e) => {
            error!(error = %e, "error listando programas");
            HttpResponse::InternalServerError().json(json!({"error": "Failed to fetch programs"}))
        }
    }
}

/// GET /api/programs/default
/// Primer programa guardado junto a sus cursos. Debe registrarse antes de
/// `/api/programs/{id}` para que "default" no se tome como id.
async fn default_program_handler(state: web::Data<AppState>) -> impl Responder {
    let programs = match state.storage.all_programs() {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "error leyendo programa por defecto");
            return HttpResponse::InternalServerError().json(json!({"error": "Failed to fetch default program"}));
        }
    };

    let Some(program) = programs.into_iter().next() else {
        return HttpResponse::NotFound().json(json!({"error": "No programs available"}));
    };

    match with_courses(state.storage.as_ref(), program) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            error!(error = %e, "error leyendo cursos del programa por defecto");
            HttpResponse::InternalServerError().json(json!({"error": "Failed to fetch default program"}))
        }
    }
}

/// GET /api/programs/{id}
async fn program_handler(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let id = path.into_inner();
    let program = match state.storage.get_program(&id) {
        Ok(Some(p)) => p,
        Ok(None) => return HttpResponse::NotFound().json(json!({"error": "Program not found"})),
        Err(e) => {
            error!(error = %e, id = %id, "error leyendo programa");
            return HttpResponse::InternalServerError().json(json!({"error": "Failed to fetch program"}));
        }
    };

    match with_courses(state.storage.as_ref(), program) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            error!(error = %e, id = %id, "error leyendo cursos");
            HttpResponse::InternalServerError().json(json!({"error": "Failed to fetch program"}))
        }
    }
}

/// POST /api/chat
/// Si el asistente falla se responde 200 con el mensaje de fallback e
/// `isError: true`, para que el widget lo muestre sin tratarlo como respuesta.
async fn chat_handler(body: web::Json<ChatRequest>, state: web::Data<AppState>) -> impl Responder {
    let req = body.into_inner();
    if req.session_id.trim().is_empty() || req.message.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "Missing required fields"}));
    }

    match state
        .assistant
        .reply(&req.message, &req.history, req.course_context.as_ref())
        .await
    {
        Ok(reply) => HttpResponse::Ok().json(ChatResponse { reply, is_error: false }),
        Err(e) => {
            warn!(session = %req.session_id, error = %e, "respuesta del asistente no disponible");
            HttpResponse::Ok().json(ChatResponse { reply: e.fallback_message().to_string(), is_error: true })
        }
    }
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

/// Registra las rutas de la API. Se usa tanto en `run_server` como en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler))
        .route("/api/programs", web::get().to(programs_handler))
        .route("/api/programs/default", web::get().to(default_program_handler))
        .route("/api/programs/{id}", web::get().to(program_handler))
        .route("/api/chat", web::post().to(chat_handler));
}

pub async fn run_server(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let data = web::Data::new(state);
    info!(bind = %bind_addr, "iniciando servidor HTTP");
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
