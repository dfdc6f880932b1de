//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::{DefaultBodyLimit, State},
    handler::Handler,
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, require_admin, require_editor, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.settings.server.max_upload_bytes;

    Router::new()
        .nest("/api", api_routes(state.clone()))
        .nest("/management", management_routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Management endpoints (public)
fn management_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/liveness", get(handlers::health::liveness))
        .route("/prometheus", get(metrics_handler))
}

/// Prometheus metrics endpoint handler
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let size = state.db.size();
    let idle = state.db.num_idle() as u32;
    metrics::update_db_pool_stats(
        idle,
        size.saturating_sub(idle),
        state.settings.database.max_connections,
    );

    match metrics::gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                String::new(),
            )
        }
    }
}

/// API routes (protected)
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/cities",
            get(handlers::city::list_cities)
                .post(handlers::city::create_city.layer(middleware::from_fn(require_admin))),
        )
        .route("/cities/searchByName", get(handlers::city::search_by_name))
        .route(
            "/cities/searchByCountryName",
            get(handlers::city::search_by_country_name),
        )
        .route(
            "/cities/{id}",
            get(handlers::city::get_city)
                .patch(handlers::city::update_city.layer(middleware::from_fn(require_editor))),
        )
        .route("/countries", get(handlers::country::list_countries))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
