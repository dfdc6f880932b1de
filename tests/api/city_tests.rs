//! City API Tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{
    admin_token, editor_token, sign, token_for, user_token, with_token, TestApp, APP_NAME,
    JWT_SECRET,
};

fn header(response: &axum_test::TestResponse, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|v| v.to_str().unwrap().to_owned())
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect()
}

// ---- create ----

#[tokio::test]
async fn test_create_city_returns_created_with_location_and_alert() {
    let app = TestApp::new();

    let form = MultipartForm::new()
        .add_text("name", "Paris")
        .add_text("country", "1")
        .add_part(
            "logo",
            Part::bytes(b"\x89PNG".to_vec())
                .file_name("paris.png")
                .mime_type("image/png"),
        );

    let response = with_token(app.server.post("/api/cities"), &admin_token())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["id"].as_i64().unwrap();

    assert_eq!(header(&response, "location"), Some(format!("/api/cities/{id}")));
    assert_eq!(
        header(&response, "x-app-alert"),
        Some(format!("{APP_NAME}.city.created"))
    );
    assert_eq!(header(&response, "x-app-params"), Some(id.to_string()));

    assert_eq!(body["name"], "Paris");
    assert_eq!(body["country"]["name"], "France");
    assert_eq!(body["logo"], STANDARD.encode(b"\x89PNG"));

    assert_eq!(app.cities.len(), 1);
    let fetched = with_token(app.server.get(&format!("/api/cities/{id}")), &user_token()).await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>(), body);
}

#[tokio::test]
async fn test_create_with_id_is_rejected_without_write() {
    let app = TestApp::new();

    let form = MultipartForm::new()
        .add_text("id", "1")
        .add_text("name", "Paris");

    let response = with_token(app.server.post("/api/cities"), &admin_token())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "x-app-error"), Some("error.idexists".into()));
    assert_eq!(header(&response, "x-app-params"), Some("city".into()));
    let body: Value = response.json();
    assert_eq!(body["errorKey"], "idexists");
    assert_eq!(body["entityName"], "city");
    assert_eq!(app.cities.len(), 0);
}

#[tokio::test]
async fn test_create_treats_unset_form_values_as_absent() {
    let app = TestApp::new();

    let form = MultipartForm::new()
        .add_text("id", "undefined")
        .add_text("name", "Atlantis")
        .add_text("country", "null");

    let response = with_token(app.server.post("/api/cities"), &admin_token())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["country"], Value::Null);
    assert_eq!(body["logo"], "");
}

#[tokio::test]
async fn test_create_ignores_logo_sent_as_text() {
    let app = TestApp::new();

    let form = MultipartForm::new()
        .add_text("name", "Paris")
        .add_text("logo", "undefined");

    let response = with_token(app.server.post("/api/cities"), &admin_token())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["logo"], "");
}

#[tokio::test]
async fn test_create_without_name_is_rejected() {
    let app = TestApp::new();

    let response = with_token(app.server.post("/api/cities"), &admin_token())
        .multipart(MultipartForm::new().add_text("country", "1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.cities.len(), 0);
}

#[tokio::test]
async fn test_create_with_unknown_country_is_rejected() {
    let app = TestApp::new();

    let form = MultipartForm::new()
        .add_text("name", "Nowhere")
        .add_text("country", "999");

    let response = with_token(app.server.post("/api/cities"), &admin_token())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header(&response, "x-app-error"),
        Some("error.countrynotfound".into())
    );
    assert_eq!(app.cities.len(), 0);
}

#[tokio::test]
async fn test_create_with_non_numeric_id_is_bad_request() {
    let app = TestApp::new();

    let form = MultipartForm::new()
        .add_text("id", "abc")
        .add_text("name", "Paris");

    let response = with_token(app.server.post("/api/cities"), &admin_token())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_requires_admin_authority() {
    let app = TestApp::new();

    let response = with_token(app.server.post("/api/cities"), &editor_token())
        .multipart(MultipartForm::new().add_text("name", "Paris"))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(app.cities.len(), 0);
}

#[tokio::test]
async fn test_create_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/cities")
        .multipart(MultipartForm::new().add_text("name", "Paris"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ---- update ----

#[tokio::test]
async fn test_update_name_only_keeps_country_and_logo() {
    let app = TestApp::new();
    let city = app.cities.insert("Paris", Some(1), b"logo");

    let form = MultipartForm::new()
        .add_text("id", city.id.to_string())
        .add_text("name", "Lutetia")
        .add_text("country", "");

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(form)
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        header(&response, "x-app-alert"),
        Some(format!("{APP_NAME}.city.updated"))
    );
    assert_eq!(header(&response, "x-app-params"), Some(city.id.to_string()));

    let stored = app.cities.get(city.id).unwrap();
    assert_eq!(stored.name, "Lutetia");
    assert_eq!(stored.country_id(), Some(1));
    assert_eq!(stored.logo, b"logo".to_vec());
}

#[tokio::test]
async fn test_update_replaces_country_and_logo() {
    let app = TestApp::new();
    let city = app.cities.insert("Osaka", Some(1), b"old");

    let form = MultipartForm::new()
        .add_text("id", city.id.to_string())
        .add_text("country", "2")
        .add_part("logo", Part::bytes(b"new".to_vec()).file_name("osaka.png"));

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(form)
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Osaka");
    assert_eq!(body["country"]["name"], "Japan");
    assert_eq!(body["logo"], STANDARD.encode(b"new"));
}

#[tokio::test]
async fn test_update_keeps_logo_when_logo_sent_as_text() {
    let app = TestApp::new();
    let city = app.cities.insert("Paris", Some(1), b"stored");

    let form = MultipartForm::new()
        .add_text("id", city.id.to_string())
        .add_text("name", "Paris")
        .add_text("logo", "undefined");

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(form)
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(app.cities.get(city.id).unwrap().logo, b"stored".to_vec());
}

#[tokio::test]
async fn test_update_with_blank_name_is_rejected() {
    let app = TestApp::new();
    let city = app.cities.insert("Paris", Some(1), b"");

    let form = MultipartForm::new()
        .add_text("id", city.id.to_string())
        .add_text("name", "   ");

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(form)
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.cities.get(city.id).unwrap().name, "Paris");
}

#[tokio::test]
async fn test_update_with_mismatched_id_leaves_row_unchanged() {
    let app = TestApp::new();
    let city = app.cities.insert("Paris", Some(1), b"");
    let other = app.cities.insert("Lyon", Some(1), b"");

    let form = MultipartForm::new()
        .add_text("id", other.id.to_string())
        .add_text("name", "Changed");

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(form)
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "x-app-error"), Some("error.idinvalid".into()));
    assert_eq!(app.cities.get(city.id).unwrap().name, "Paris");
    assert_eq!(app.cities.get(other.id).unwrap().name, "Lyon");
}

#[tokio::test]
async fn test_update_without_id_is_rejected() {
    let app = TestApp::new();
    let city = app.cities.insert("Paris", None, b"");

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(MultipartForm::new().add_text("name", "Changed"))
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "x-app-error"), Some("error.idnull".into()));
    assert_eq!(app.cities.get(city.id).unwrap().name, "Paris");
}

#[tokio::test]
async fn test_update_of_unknown_id_is_rejected() {
    let app = TestApp::new();
    let city = app.cities.insert("Ghost", None, b"");
    app.cities.remove(city.id);

    let form = MultipartForm::new()
        .add_text("id", city.id.to_string())
        .add_text("name", "Changed");

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(form)
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "x-app-error"), Some("error.idnotfound".into()));
    assert_eq!(app.cities.len(), 0);
}

#[tokio::test]
async fn test_update_requires_editor_authority() {
    let app = TestApp::new();
    let city = app.cities.insert("Paris", None, b"");

    let form = MultipartForm::new()
        .add_text("id", city.id.to_string())
        .add_text("name", "Changed");

    let response = with_token(
        app.server.patch(&format!("/api/cities/{}", city.id)),
        &admin_token(),
    )
    .multipart(form)
    .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(app.cities.get(city.id).unwrap().name, "Paris");
}

#[tokio::test]
async fn test_put_is_not_an_update_verb() {
    let app = TestApp::new();
    let city = app.cities.insert("Paris", None, b"");

    let response = with_token(
        app.server.put(&format!("/api/cities/{}", city.id)),
        &editor_token(),
    )
    .multipart(MultipartForm::new().add_text("id", city.id.to_string()))
    .await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---- reads ----

#[tokio::test]
async fn test_get_missing_city_is_not_found() {
    let app = TestApp::new();

    let response = with_token(app.server.get("/api/cities/424242"), &user_token()).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn test_get_with_non_numeric_id_is_bad_request() {
    let app = TestApp::new();

    let response = with_token(app.server.get("/api/cities/paris"), &user_token()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reads_require_authentication() {
    let app = TestApp::new();

    let missing = app.server.get("/api/cities").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    let garbage = with_token(app.server.get("/api/cities"), "not-a-jwt").await;
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);

    let expired = sign("user", &["ROLE_USER"], Duration::hours(-2), JWT_SECRET);
    let expired = with_token(app.server.get("/api/cities"), &expired).await;
    assert_eq!(expired.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_without_known_authorities_can_read() {
    let app = TestApp::new();
    app.cities.insert("Paris", Some(1), b"");

    let token = token_for("guest", &["ROLE_ANONYMOUS"]);
    let response = with_token(app.server.get("/api/cities"), &token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_sets_pagination_headers() {
    let app = TestApp::new();
    for name in ["A", "B", "C", "D", "E"] {
        app.cities.insert(name, Some(1), b"");
    }

    let response = with_token(app.server.get("/api/cities?page=1&size=2"), &user_token()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(header(&response, "x-total-count"), Some("5".into()));
    assert_eq!(
        header(&response, "link"),
        Some(
            concat!(
                "</api/cities?page=2&size=2>; rel=\"next\",",
                "</api/cities?page=0&size=2>; rel=\"prev\",",
                "</api/cities?page=2&size=2>; rel=\"last\",",
                "</api/cities?page=0&size=2>; rel=\"first\""
            )
            .to_string()
        )
    );
    assert_eq!(ids(&response.json()), vec![3, 4]);
}

#[tokio::test]
async fn test_list_sorts_by_name_descending() {
    let app = TestApp::new();
    for name in ["Berlin", "Auckland", "Cairo"] {
        app.cities.insert(name, None, b"");
    }

    let response = with_token(app.server.get("/api/cities?sort=name,desc"), &user_token()).await;

    let body: Value = response.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cairo", "Berlin", "Auckland"]);
}

#[tokio::test]
async fn test_list_with_unknown_sort_property_is_bad_request() {
    let app = TestApp::new();

    let response = with_token(app.server.get("/api/cities?sort=logo,asc"), &user_token()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_country() {
    let app = TestApp::new();
    app.cities.insert("Paris", Some(1), b"");
    let tokyo = app.cities.insert("Tokyo", Some(2), b"");
    let kyoto = app.cities.insert("Kyoto", Some(2), b"");

    let response = with_token(app.server.get("/api/cities?countryId=2"), &user_token()).await;

    assert_eq!(header(&response, "x-total-count"), Some("2".into()));
    assert_eq!(ids(&response.json()), vec![tokyo.id, kyoto.id]);
    assert!(header(&response, "link").unwrap().contains("countryId=2"));
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive_substring() {
    let app = TestApp::new();
    let paris = app.cities.insert("Paris", Some(1), b"");
    app.cities.insert("Lyon", Some(1), b"");
    let parma = app.cities.insert("PARMA", None, b"");

    let response = with_token(
        app.server.get("/api/cities/searchByName?name=par"),
        &user_token(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(ids(&response.json()), vec![paris.id, parma.id]);
}

#[tokio::test]
async fn test_search_by_country_name() {
    let app = TestApp::new();
    app.cities.insert("Paris", Some(1), b"");
    let auckland = app.cities.insert("Auckland", Some(3), b"");
    app.cities.insert("Atlantis", None, b"");

    let response = with_token(
        app.server.get("/api/cities/searchByCountryName?countryName=zeal"),
        &user_token(),
    )
    .await;

    assert_eq!(ids(&response.json()), vec![auckland.id]);
}

#[tokio::test]
async fn test_search_without_term_is_bad_request() {
    let app = TestApp::new();

    let response = with_token(app.server.get("/api/cities/searchByName"), &user_token()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
