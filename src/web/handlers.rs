// API Handlers
// Detection and similarity endpoints accept either a JSON body or a
// multipart upload; both store a report per successful analysis.
// Detection never answers 5xx for analysis faults — a neutral fallback
// record goes out with HTTP 200 instead.

use std::collections::HashMap;
use std::path::PathBuf;

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::{api_error, AppState};
use crate::models::{AnalysisResult, NewReport, SimilarityResult};
use crate::services::{detection, file_extractor, similarity};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub async fn home() -> Html<&'static str> {
    Html(
        "<html><head><title>Veritext API</title></head>\
         <body><h1>Welcome to Veritext</h1>\
         <p>Server is running successfully!</p></body></html>",
    )
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not Found",
            "message": "The requested resource was not found on this server",
            "status_code": 404
        })),
    )
        .into_response()
}

pub async fn get_reports(State(state): State<AppState>) -> Response {
    Json(state.reports.list()).into_response()
}

// ============ AI Detection ============

pub async fn detect_ai(State(state): State<AppState>, request: Request) -> Response {
    if is_multipart(&request) {
        return detect_ai_file(state, request).await;
    }

    let body = match json_body(request).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(text) = nonempty_string(&body, "text") else {
        return api_error(StatusCode::BAD_REQUEST, "No text provided");
    };

    let result = run_detection(text.clone()).await;
    if let Err(e) = state.reports.save(NewReport::ai_detection(text, &result)) {
        error!(error = %e, "failed to save detection report");
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Error analyzing text: {e}"),
        );
    }
    Json(result).into_response()
}

async fn detect_ai_file(state: AppState, request: Request) -> Response {
    let mut files = match collect_uploads(request).await {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    let Some((file_name, bytes)) = files.remove("file") else {
        return api_error(StatusCode::BAD_REQUEST, "No file provided");
    };
    if !file_extractor::allowed_file(&file_name) {
        return api_error(StatusCode::BAD_REQUEST, "Invalid file type");
    }

    let saved = match state.uploads.save(&file_name, &bytes) {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "failed to save upload");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save file");
        }
    };

    let text = match run_extraction(saved.clone()).await {
        Ok(text) => text,
        Err(e) => {
            state.uploads.remove(&saved);
            return api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Error processing file: {e}"),
            );
        }
    };

    let result = run_detection(text.clone()).await;
    if let Err(e) = state.reports.save(NewReport::ai_detection(text, &result)) {
        error!(error = %e, "failed to save detection report");
        state.uploads.remove(&saved);
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Error processing file: {e}"),
        );
    }

    state.uploads.remove(&saved);
    Json(result).into_response()
}

/// Run the detector on a blocking task. A panic crossing the task
/// boundary degrades to the neutral fallback record — the endpoint
/// still answers 200.
async fn run_detection(text: String) -> AnalysisResult {
    match tokio::task::spawn_blocking(move || detection::analyze_text(&text)).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "detection task failed");
            AnalysisResult::indeterminate(e.to_string())
        }
    }
}

// ============ Similarity ============

pub async fn analyze_similarity(State(state): State<AppState>, request: Request) -> Response {
    if is_multipart(&request) {
        return analyze_similarity_files(state, request).await;
    }

    let body = match json_body(request).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let (Some(text1), Some(text2)) = (
        nonempty_string(&body, "text1"),
        nonempty_string(&body, "text2"),
    ) else {
        return api_error(StatusCode::BAD_REQUEST, "Both texts are required");
    };

    let result = match run_similarity(text1.clone(), text2.clone()).await {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    if let Err(e) = state
        .reports
        .save(NewReport::similarity(text1, text2, &result))
    {
        error!(error = %e, "failed to save similarity report");
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
    }
    Json(result).into_response()
}

async fn analyze_similarity_files(state: AppState, request: Request) -> Response {
    let mut files = match collect_uploads(request).await {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    let (Some((name1, bytes1)), Some((name2, bytes2))) =
        (files.remove("file1"), files.remove("file2"))
    else {
        return api_error(StatusCode::BAD_REQUEST, "Invalid file(s)");
    };
    if !file_extractor::allowed_file(&name1) || !file_extractor::allowed_file(&name2) {
        return api_error(StatusCode::BAD_REQUEST, "Invalid file(s)");
    }

    let saved1 = match state.uploads.save(&name1, &bytes1) {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "failed to save upload");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save file");
        }
    };
    let saved2 = match state.uploads.save(&name2, &bytes2) {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "failed to save upload");
            state.uploads.remove(&saved1);
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save file");
        }
    };

    let cleanup = |state: &AppState| {
        state.uploads.remove(&saved1);
        state.uploads.remove(&saved2);
    };

    let texts = match (
        run_extraction(saved1.clone()).await,
        run_extraction(saved2.clone()).await,
    ) {
        (Ok(t1), Ok(t2)) => (t1, t2),
        _ => {
            cleanup(&state);
            return api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read file content",
            );
        }
    };

    let result = match run_similarity(texts.0.clone(), texts.1.clone()).await {
        Ok(r) => r,
        Err(resp) => {
            cleanup(&state);
            return resp;
        }
    };
    if let Err(e) = state
        .reports
        .save(NewReport::similarity(texts.0, texts.1, &result))
    {
        error!(error = %e, "failed to save similarity report");
        cleanup(&state);
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
    }

    cleanup(&state);
    Json(result).into_response()
}

/// Unlike detection, a similarity fault is a plain 500 — there is no
/// documented neutral fallback for this endpoint.
async fn run_similarity(text1: String, text2: String) -> Result<SimilarityResult, Response> {
    tokio::task::spawn_blocking(move || similarity::analyze(&text1, &text2))
        .await
        .map_err(|e| {
            error!(error = %e, "similarity task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        })
}

// ============ Request Plumbing ============

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

async fn json_body(request: Request) -> Result<serde_json::Value, Response> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid request format"))?;
    serde_json::from_slice(&bytes)
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid request format"))
}

fn nonempty_string(body: &serde_json::Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

async fn run_extraction(path: PathBuf) -> Result<String, String> {
    match tokio::task::spawn_blocking(move || file_extractor::extract_text(&path)).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(e) => {
            error!(error = %e, "extraction task failed");
            Err(e.to_string())
        }
    }
}

async fn collect_uploads(request: Request) -> Result<HashMap<String, (String, Vec<u8>)>, Response> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid request format"))?;

    let mut files = HashMap::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    api_error(StatusCode::BAD_REQUEST, &format!("Invalid upload: {e}"))
                })?;
                files.insert(name, (file_name, bytes.to_vec()));
            }
            Ok(None) => break,
            Err(e) => {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    &format!("Invalid upload: {e}"),
                ))
            }
        }
    }
    Ok(files)
}
