//! Management Endpoint Tests

use axum::http::StatusCode;

use crate::common::{user_token, with_token, TestApp};

#[tokio::test]
async fn test_liveness_is_public() {
    let app = TestApp::new();

    let response = app.server.get("/management/health/liveness").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["status"], "alive");
}

#[tokio::test]
async fn test_prometheus_reports_request_metrics() {
    let app = TestApp::new();
    with_token(app.server.get("/api/countries"), &user_token()).await;

    let response = app.server.get("/management/prometheus").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let text = response.text();
    assert!(text.contains("city_directory_http_requests_total"));
    assert!(text.contains("path=\"/api/countries\""));
}
