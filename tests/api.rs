// API integration tests — exercise the router end to end with an
// in-process tower service and temp-dir backed stores.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use veritext::services::{self, ReportStore, UploadStore};
use veritext::web::{build_router, AppState};

fn test_app(dir: &tempfile::TempDir) -> Router {
    services::initialize().expect("resource init");
    let state = AppState {
        reports: Arc::new(ReportStore::new(dir.path().join("reports.json"))),
        uploads: Arc::new(UploadStore::new(dir.path().join("uploads"))),
    };
    build_router(state)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_response(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_response(response).await;
    assert_eq!(body["status_code"], 404);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn test_detect_ai_json() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(json_post(
            "/api/detect-ai",
            serde_json::json!({
                "text": "The quick brown fox jumps over the lazy dog. It was a bright day."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;

    let prob = body["ai_probability"].as_f64().unwrap();
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&prob));
    assert!((0.0..=100.0).contains(&confidence));
    assert_eq!(body["is_ai_generated"].as_bool().unwrap(), prob > 50.0);
    assert!(body["message"].as_str().unwrap().len() > 0);
    assert!(body["details"]["pattern_score"].is_number());
}

#[tokio::test]
async fn test_detect_ai_missing_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(json_post("/api/detect-ai", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["error"], "No text provided");
}

#[tokio::test]
async fn test_detect_ai_malformed_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/detect-ai")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Invalid request format");
}

#[tokio::test]
async fn test_analyze_similarity_json() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(json_post(
            "/api/analyze-similarity",
            serde_json::json!({
                "text1": "Machine learning models transform raw data into predictions.",
                "text2": "Machine learning systems turn raw data into useful predictions."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;

    let jaccard = body["jaccard_similarity"].as_f64().unwrap();
    let cosine = body["cosine_similarity"].as_f64().unwrap();
    let tfidf = body["tfidf_similarity"].as_f64().unwrap();
    let average = body["average_similarity"].as_f64().unwrap();

    assert!(jaccard > 0.0);
    assert!(cosine > 0.0);
    let expected = (jaccard + cosine + tfidf) / 3.0;
    assert!((average - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_analyze_similarity_requires_both_texts() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(json_post(
            "/api/analyze-similarity",
            serde_json::json!({ "text1": "only one text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Both texts are required");
}

#[tokio::test]
async fn test_reports_accumulate() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/detect-ai",
            serde_json::json!({ "text": "A short sample sentence for the record." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/analyze-similarity",
            serde_json::json!({ "text1": "alpha beta gamma", "text2": "alpha beta delta" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reports")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_response(response).await;
    let reports = body.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["id"], 1);
    assert_eq!(reports[0]["type"], "ai_detection");
    assert_eq!(reports[1]["id"], 2);
    assert_eq!(reports[1]["type"], "similarity_analysis");
    assert!(reports[1]["result"]["average_similarity"].is_number());
}

#[tokio::test]
async fn test_detect_ai_multipart_txt_upload() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let boundary = "veritextboundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"essay.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         The committee reviewed every proposal in detail before voting.\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/detect-ai")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert!(body["ai_probability"].is_number());
}

#[tokio::test]
async fn test_detect_ai_multipart_rejects_bad_extension() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let boundary = "veritextboundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"payload.exe\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         binary junk\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/detect-ai")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Invalid file type");
}
