// Web server — Axum-based JSON API over the analysis engine.
//
// Three API routes: AI detection, similarity analysis, and the stored
// report list. The detection and similarity routes accept either a JSON
// body or a multipart file upload. The core never sees HTTP; handlers
// extract text, call the engine on a blocking task, and persist reports.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::services::{ReportStore, UploadStore};

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportStore>,
    pub uploads: Arc<UploadStore>,
}

/// Start the web server and block until it exits.
pub async fn run_server(config: Config) -> Result<()> {
    let state = AppState {
        reports: Arc::new(ReportStore::new(config.reports_file.clone())),
        uploads: Arc::new(UploadStore::new(config.upload_dir.clone())),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.bind, config.port);
    info!("Veritext API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/api/reports", get(handlers::get_reports))
        .route("/api/detect-ai", post(handlers::detect_ai))
        .route("/api/analyze-similarity", post(handlers::analyze_similarity))
        .fallback(handlers::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
