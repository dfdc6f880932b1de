//! Country API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{user_token, with_token, TestApp};

#[tokio::test]
async fn test_list_countries_ordered_by_id() {
    let app = TestApp::new();

    let response = with_token(app.server.get("/api/countries"), &user_token()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!([
            {"id": 1, "name": "France"},
            {"id": 2, "name": "Japan"},
            {"id": 3, "name": "New Zealand"}
        ])
    );
}

#[tokio::test]
async fn test_list_countries_requires_authentication() {
    let app = TestApp::new();

    let response = app.server.get("/api/countries").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
