use std::path::PathBuf;

use actix_files::Files;
use actix_web::guard;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};

use crate::config::ServerConfig;
use crate::error::RequestError;
use crate::model::{ErrorBody, ScheduleResponse, Summary};
use crate::schedule::schedule_orders;
use crate::validation::parse_schedule_request;

/// Validates a raw request body and runs the dispatcher on it
pub fn schedule_payload(raw: &[u8]) -> Result<ScheduleResponse, RequestError> {
    let request = parse_schedule_request(raw)?;
    let result = schedule_orders(&request.orders, &request.vehicles);

    let summary = Summary {
        orders_total: request.orders.len() as u64,
        orders_assigned: result.assignments.len() as u64,
        orders_unassigned: result.unassigned_orders.len() as u64,
    };

    Ok(ScheduleResponse {
        assignments: result.assignments,
        unassigned_orders: result.unassigned_orders,
        total_score: Some(result.total_score),
        summary: Some(summary),
    })
}

// Schedule endpoint
async fn schedule(body: web::Bytes) -> Result<HttpResponse, RequestError> {
    match schedule_payload(&body) {
        Ok(response) => {
            if let Some(summary) = &response.summary {
                tracing::info!(
                    orders = summary.orders_total,
                    assigned = summary.orders_assigned,
                    unassigned = summary.orders_unassigned,
                    "schedule computed"
                );
            }
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected schedule request");
            Err(e)
        }
    }
}

// Health endpoint
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

/// JSON 404 for every route nothing else claims
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody {
        error: "Not found".to_string(),
    })
}

/// Registers the JSON API routes
pub fn configure_api(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::PayloadConfig::new(max_body_bytes))
            .route("/api/health", web::get().to(health))
            .route("/api/schedule", web::post().to(schedule));
    }
}

/// Serves dashboard assets from `dir` at `/`. Only GET and HEAD are claimed;
/// other methods and missing files fall through to the JSON 404.
pub fn configure_static(dir: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            Files::new("/", dir)
                .index_file("index.html")
                .guard(guard::Any(guard::Get()).or(guard::Head()))
                .default_handler(web::to(not_found)),
        );
    }
}

pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    let web_dir = config
        .web_dir
        .clone()
        .filter(|dir| dir.is_dir());
    match (&config.web_dir, &web_dir) {
        (Some(dir), None) => tracing::warn!(dir = %dir.display(), "web dir not found, serving API only"),
        (_, Some(dir)) => tracing::info!(dir = %dir.display(), "serving dashboard assets"),
        _ => {}
    }

    let max_body_bytes = config.max_body_bytes;
    tracing::info!("dispatch server running on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(middleware::Logger::default())
            .configure(configure_api(max_body_bytes));
        if let Some(dir) = &web_dir {
            app = app.configure(configure_static(dir.clone()));
        }
        app.default_service(web::to(not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
