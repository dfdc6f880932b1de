//! CORS Middleware Configuration

use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

/// Response headers the browser client reads
const EXPOSED_HEADERS: [HeaderName; 6] = [
    header::LOCATION,
    header::LINK,
    HeaderName::from_static("x-total-count"),
    HeaderName::from_static("x-app-alert"),
    HeaderName::from_static("x-app-error"),
    HeaderName::from_static("x-app-params"),
];

/// Create CORS layer from settings
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<_> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers(EXPOSED_HEADERS);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer
            .allow_origin(origins)
            .max_age(std::time::Duration::from_secs(3600))
    }
}
