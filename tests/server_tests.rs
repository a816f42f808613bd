use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use pathway_mapper::algorithm::Transformer;
use pathway_mapper::assistant::Assistant;
use pathway_mapper::config::AssistantConfig;
use pathway_mapper::loader::import_pathway_file;
use pathway_mapper::server::{configure, AppState};
use pathway_mapper::storage::{MemStorage, Storage};

const FIXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/merced_computer_science.json");

/// Estado con el fixture importado y un asistente sin API key
fn state(with_program: bool) -> (AppState, Option<String>) {
    let storage = Arc::new(MemStorage::new());
    let program_id = if with_program {
        let summary = import_pathway_file(FIXTURE_PATH, storage.as_ref(), &Transformer::default()).expect("importa");
        Some(summary.program.id)
    } else {
        None
    };
    let assistant = Assistant::new(AssistantConfig::default()).expect("cliente");
    let storage: Arc<dyn Storage> = storage;
    (AppState::new(storage, assistant), program_id)
}

#[actix_web::test]
async fn lista_programas() {
    let (st, _) = state(true);
    let app = test::init_service(App::new().app_data(web::Data::new(st)).configure(configure)).await;
    let req = test::TestRequest::get().uri("/api/programs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let programs = body.as_array().expect("lista");
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0]["name"], "CSCI-AS - Computer Science");
    assert_eq!(programs[0]["totalUnits"], 20);
}

#[actix_web::test]
async fn programa_por_defecto_con_cursos() {
    let (st, _) = state(true);
    let app = test::init_service(App::new().app_data(web::Data::new(st)).configure(configure)).await;
    let req = test::TestRequest::get().uri("/api/programs/default").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["program"]["name"], "CSCI-AS - Computer Science");
    let courses = body["courses"].as_array().expect("cursos");
    assert_eq!(courses.len(), 6);
    assert_eq!(courses[3]["code"], "CS 102");
    assert_eq!(courses[3]["prerequisites"], json!(["CS 101"]));
    assert!(courses[0]["prerequisites"].is_null());
}

#[actix_web::test]
async fn programa_por_defecto_sin_datos_es_404() {
    let (st, _) = state(false);
    let app = test::init_service(App::new().app_data(web::Data::new(st)).configure(configure)).await;
    let req = test::TestRequest::get().uri("/api/programs/default").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn programa_por_id() {
    let (st, program_id) = state(true);
    let program_id = program_id.expect("id");
    let app = test::init_service(App::new().app_data(web::Data::new(st)).configure(configure)).await;

    let req = test::TestRequest::get().uri(&format!("/api/programs/{}", program_id)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["program"]["id"], program_id.as_str());
    assert!(body["courses"].as_array().expect("cursos").iter().all(|c| c["programId"] == program_id.as_str()));

    let req = test::TestRequest::get().uri("/api/programs/no-existe").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn chat_valida_campos() {
    let (st, _) = state(false);
    let app = test::init_service(App::new().app_data(web::Data::new(st)).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"sessionId": "", "message": "hola"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn chat_sin_api_key_responde_fallback() {
    let (st, _) = state(false);
    let app = test::init_service(App::new().app_data(web::Data::new(st)).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({
            "sessionId": "s1",
            "message": "What do I need before CS 110?",
            "history": [{"role": "user", "content": "hi"}, {"role": "assistant", "content": "hello"}]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["isError"], true);
    assert!(body["reply"].as_str().expect("texto").contains("not configured"));
}

#[actix_web::test]
async fn health() {
    let (st, _) = state(false);
    let app = test::init_service(App::new().app_data(web::Data::new(st)).configure(configure)).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}
