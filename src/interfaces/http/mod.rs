use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::application::use_cases::catalog_store::read_catalog;
use crate::domain::catalog::CatalogFilters;
use crate::domain::error::AppError;
use crate::interfaces::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeckQuery {
    #[serde(flatten)]
    pub filters: CatalogFilters,
    /// Free-text search, list mode only
    #[serde(default)]
    pub q: String,
}

#[get("/deck")]
async fn deck(data: web::Data<AppState>, query: web::Query<DeckQuery>) -> impl Responder {
    let catalog = read_catalog(&data.catalog);
    HttpResponse::Ok().json(data.presenter.deck(&catalog, &query.filters))
}

#[get("/list")]
async fn list(data: web::Data<AppState>, query: web::Query<DeckQuery>) -> impl Responder {
    let catalog = read_catalog(&data.catalog);
    HttpResponse::Ok().json(data.presenter.list(&catalog, &query.filters, &query.q))
}

#[get("/items/{index}")]
async fn item_detail(data: web::Data<AppState>, path: web::Path<usize>) -> impl Responder {
    let index = path.into_inner();
    let catalog = read_catalog(&data.catalog);

    match data.presenter.detail(&catalog, index) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => error_response(&e),
    }
}

#[get("/status")]
async fn status(data: web::Data<AppState>) -> impl Responder {
    let items = read_catalog(&data.catalog).len();
    HttpResponse::Ok().json(json!({
        "load": data.loader.state(),
        "items": items,
    }))
}

#[post("/reload")]
async fn reload(data: web::Data<AppState>) -> impl Responder {
    info!("Reload requested");
    data.reloads.call(());
    HttpResponse::Accepted().json(json!({
        "status": "scheduled",
        "quiet_period_ms": data.reloads.quiet_period().as_millis() as u64,
    }))
}

pub fn error_response(err: &AppError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(body),
        AppError::Busy(_) => HttpResponse::Conflict().json(body),
        AppError::SourceUnavailable(_) => HttpResponse::BadGateway().json(body),
        _ => {
            warn!(error = %err, "Request failed");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Route table, shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(deck)
            .service(list)
            .service(item_detail)
            .service(status)
            .service(reload),
    );
}

pub fn start_server(state: web::Data<AppState>) -> std::io::Result<Server> {
    let host = state.config.bind_host.clone();
    let port = state.config.bind_port;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // local presentation API

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run();

    info!(host = %host, port, "Deck API listening");
    Ok(server)
}
