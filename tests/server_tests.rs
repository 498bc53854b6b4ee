// Routes exercised through warp::test with stand-in classifiers

use std::sync::Arc;

use pneumoscan::core::Diagnosis;
use pneumoscan::server::{routes, ApiError, HealthResponse, PredictResponse};
use warp::http::StatusCode;

mod common;
use common::{
    missing_state, multipart, png_bytes, ready_state, BrokenClassifier, FixedClassifier, ANY_PANEL, NORMAL_PANEL,
    PNEUMONIA_PANEL,
};

fn body_text(resp: &warp::http::Response<bytes::Bytes>) -> String {
    String::from_utf8_lossy(resp.body()).into_owned()
}

#[tokio::test]
async fn test_index_without_model_shows_banner() {
    let filter = routes(missing_state());
    let resp = warp::test::request().method("GET").path("/").reply(&filter).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(&resp);
    assert!(html.contains("Model file not found in the <code>models/</code> directory."));
    assert!(html.contains("Upload a chest X-ray image to get started"));
}

#[tokio::test]
async fn test_index_with_model_has_no_banner() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Normal)));
    let resp = warp::test::request().method("GET").path("/").reply(&filter).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(&resp);
    assert!(!html.contains("Model file not found"));
    assert!(html.contains("🔍 Analyze Image"));
}

#[tokio::test]
async fn test_analyze_without_model_refuses() {
    let filter = routes(missing_state());
    let (content_type, body) = multipart("file", "chest.png", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_text(&resp);
    assert!(html.contains("Prediction cannot run because the model is missing."));
    assert!(!html.contains(ANY_PANEL));
}

#[tokio::test]
async fn test_analyze_pneumonia_renders_single_panel() {
    let classifier = FixedClassifier::new(Diagnosis::Pneumonia);
    let filter = routes(ready_state(classifier.clone()));
    let (content_type, body) = multipart("file", "patient 7.PNG", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(&resp);
    assert!(html.contains(PNEUMONIA_PANEL));
    assert!(html.contains("PNEUMONIA DETECTED"));
    assert!(!html.contains(NORMAL_PANEL));
    assert!(html.contains("📁 patient 7.PNG"));
    assert!(html.contains("data:image/png;base64,"));

    let seen = classifier.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (tmp_path, existed) = &seen[0];
    assert!(existed, "temporary file should exist during inference");
    assert!(tmp_path.to_string_lossy().ends_with(".png"));
    assert!(!tmp_path.exists(), "temporary file should be removed afterwards");
}

#[tokio::test]
async fn test_analyze_normal_renders_single_panel() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Normal)));
    let (content_type, body) = multipart("file", "chest.png", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(&resp);
    assert!(html.contains(NORMAL_PANEL));
    assert!(html.contains("✅ NORMAL"));
    assert!(!html.contains(PNEUMONIA_PANEL));
}

#[tokio::test]
async fn test_analyze_rejects_unsupported_type() {
    let classifier = FixedClassifier::new(Diagnosis::Normal);
    let filter = routes(ready_state(classifier.clone()));
    let (content_type, body) = multipart("file", "scan.gif", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(&resp).contains("Unsupported file type: scan.gif"));
    assert!(classifier.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_without_file_field() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Normal)));
    let (content_type, body) = multipart("other", "chest.png", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(&resp).contains("No image was uploaded"));
}

#[tokio::test]
async fn test_analyze_inference_error_is_reported() {
    let filter = routes(ready_state(Arc::new(BrokenClassifier)));
    let (content_type, body) = multipart("file", "chest.png", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(&resp);
    assert!(html.contains("Error during analysis: input tensor has wrong rank"));
    assert!(!html.contains(ANY_PANEL));
}

#[tokio::test]
async fn test_api_predict_returns_label() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Pneumonia)));
    let (content_type, body) = multipart("file", "chest.png", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/api/predict")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: PredictResponse = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.label, Diagnosis::Pneumonia);
    assert_eq!(body.model, "fixed.onnx");
    assert_eq!(body.filename, "chest.png");
    assert!(String::from_utf8_lossy(resp.body()).contains("\"PNEUMONIA\""));
}

#[tokio::test]
async fn test_api_predict_without_model() {
    let filter = routes(missing_state());
    let (content_type, body) = multipart("file", "chest.png", &png_bytes());
    let resp = warp::test::request()
        .method("POST")
        .path("/api/predict")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ApiError = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.code, "model_missing");
}

#[tokio::test]
async fn test_api_predict_rejects_garbage_image() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Normal)));
    let (content_type, body) = multipart("file", "chest.jpg", b"GIF89a not really");
    let resp = warp::test::request()
        .method("POST")
        .path("/api/predict")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiError = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.code, "undecodable_image");
}

#[tokio::test]
async fn test_health_reports_model() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Normal)));
    let resp = warp::test::request().method("GET").path("/health").reply(&filter).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: HealthResponse = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.status, "ok");
    assert_eq!(body.model.as_deref(), Some("fixed.onnx"));
}

#[tokio::test]
async fn test_health_without_model() {
    let filter = routes(missing_state());
    let resp = warp::test::request().method("GET").path("/health").reply(&filter).await;

    let body: HealthResponse = serde_json::from_slice(resp.body()).unwrap();
    assert!(body.model.is_none());
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let filter = routes(missing_state());
    let resp = warp::test::request().method("GET").path("/nope").reply(&filter).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ApiError = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.code, "not_found");
}

fn oversized_upload() -> (String, Vec<u8>) {
    multipart("file", "huge.png", &vec![0u8; 11 * 1024 * 1024])
}

#[tokio::test]
async fn test_api_predict_oversized_upload_is_413() {
    let classifier = FixedClassifier::new(Diagnosis::Normal);
    let filter = routes(ready_state(classifier.clone()));
    let (content_type, body) = oversized_upload();
    let resp = warp::test::request()
        .method("POST")
        .path("/api/predict")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: ApiError = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.code, "payload_too_large");
    assert!(classifier.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_predict_without_multipart_is_invalid_header() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Normal)));
    let resp = warp::test::request()
        .method("POST")
        .path("/api/predict")
        .header("content-type", "text/plain")
        .body("not an image")
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiError = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.code, "invalid_header");
}

#[tokio::test]
async fn test_get_analyze_is_method_not_allowed() {
    let filter = routes(ready_state(FixedClassifier::new(Diagnosis::Normal)));
    let resp = warp::test::request().method("GET").path("/analyze").reply(&filter).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: ApiError = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body.code, "method_not_allowed");
}

#[tokio::test]
async fn test_analyze_oversized_upload_renders_page() {
    let classifier = FixedClassifier::new(Diagnosis::Normal);
    let filter = routes(ready_state(classifier.clone()));
    let (content_type, body) = oversized_upload();
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", content_type)
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let html = body_text(&resp);
    assert!(html.contains("Uploaded file is too large (limit 10 MB)"));
    assert!(html.contains("🔍 Analyze Image"));
    assert!(!html.contains(ANY_PANEL));
    assert!(classifier.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_without_multipart_renders_page() {
    let filter = routes(missing_state());
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", "text/plain")
        .body("not an image")
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(&resp);
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Invalid request header"));
    assert!(html.contains("Model file not found in the <code>models/</code> directory."));
}
