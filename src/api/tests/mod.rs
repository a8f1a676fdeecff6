use super::*;
use crate::sink::{CSV_FILENAME, JSON_FILENAME};
use crate::types::AnalysisBatch;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tempfile::tempdir;
use tower::ServiceExt; // for oneshot
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test SiteAnalyzer in a temp output directory
fn create_test_analyzer(output_dir: &std::path::Path) -> (Arc<SiteAnalyzer>, Arc<Config>) {
    let mut config = Config::default();
    config.analysis.output_dir = output_dir.to_path_buf();
    config.analysis.fetch_timeout_secs = 5;
    let config = Arc::new(config);
    let analyzer = Arc::new(SiteAnalyzer::new((*config).clone()).unwrap());
    (analyzer, config)
}

fn post_analyze(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns() {
    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());

    // Port 0 = OS assigns a free port
    let mut config = (*config).clone();
    config.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let api_handle = tokio::spawn(async move { start_api_server(analyzer, config).await });

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    api_handle.abort();
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());
    let app = create_router(analyzer, config);

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

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_endpoint() {
    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());
    let app = create_router(analyzer, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/analyze"].is_object());
}

#[tokio::test]
async fn test_analyze_empty_urls_returns_400_without_side_effects() {
    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());
    let app = create_router(analyzer, config);

    let response = app.oneshot(post_analyze(r#"{"urls": []}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("No URLs provided")
    );

    // Validation happens before any fetch or sink work
    assert!(!dir.path().join(JSON_FILENAME).exists());
    assert!(!dir.path().join(CSV_FILENAME).exists());
}

#[tokio::test]
async fn test_analyze_missing_urls_key_returns_400() {
    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());
    let app = create_router(analyzer, config);

    let response = app.oneshot(post_analyze("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_analyze_success_writes_artifacts_and_returns_200() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Acme</title></head><body></body></html>"),
        )
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());
    let app = create_router(analyzer, config);

    let request_body = serde_json::json!({ "urls": [mock_server.uri()] }).to_string();
    let response = app.oneshot(post_analyze(&request_body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Analysis completed successfully");
    assert_eq!(body["records"], 1);

    // Both artifacts exist and the JSON batch holds one success record
    let json = std::fs::read_to_string(dir.path().join(JSON_FILENAME)).unwrap();
    let batch: AnalysisBatch = serde_json::from_str(&json).unwrap();
    assert_eq!(batch.len(), 1);
    assert!(batch.results()[0].is_success());
    assert!(dir.path().join(CSV_FILENAME).exists());
}

#[tokio::test]
async fn test_analyze_requires_api_key_when_configured() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.analysis.output_dir = dir.path().to_path_buf();
    config.api.api_key = Some("secret".to_string());
    let config = Arc::new(config);
    let analyzer = Arc::new(SiteAnalyzer::new((*config).clone()).unwrap());

    let app = create_router(analyzer.clone(), config.clone());
    let response = app
        .oneshot(post_analyze(r#"{"urls": ["https://x.example"]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Same request with the key passes authentication
    let app = create_router(analyzer, config);
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("Content-Type", "application/json")
        .header("X-Api-Key", "secret")
        .body(Body::from(r#"{"urls": []}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_enabled() {
    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());
    let app = create_router(analyzer, config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let dir = tempdir().unwrap();
    let (analyzer, config) = create_test_analyzer(dir.path());
    let mut config = (*config).clone();
    config.api.cors_enabled = false;
    let app = create_router(analyzer, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be absent when CORS is disabled"
    );
}
