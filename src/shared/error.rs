//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Header carrying the translation key of a failed request, e.g. `error.idexists`
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-app-error");

/// Header carrying the parameter of an alert (entity name or id)
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-app-params");

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request rejected for an entity-level reason the client can display
    #[error("Bad request: {message} ({entity_name}.{error_key})")]
    BadRequestAlert {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn bad_request_alert(
        message: impl Into<String>,
        entity_name: &'static str,
        error_key: &'static str,
    ) -> Self {
        AppError::BadRequestAlert {
            message: message.into(),
            entity_name,
            error_key,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone()),
            AppError::BadRequestAlert { message, .. } => {
                (StatusCode::BAD_REQUEST, 10002, message.clone())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, 10003, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, 10004, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, 10007, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
        };

        let (entity_name, error_key) = match &self {
            AppError::BadRequestAlert {
                entity_name,
                error_key,
                ..
            } => (Some(*entity_name), Some(*error_key)),
            _ => (None, None),
        };

        let body = ErrorResponse {
            code,
            message,
            entity_name: entity_name.map(str::to_string),
            error_key: error_key.map(str::to_string),
        };

        let mut response = (status, Json(body)).into_response();

        if let (Some(entity_name), Some(error_key)) = (entity_name, error_key) {
            let headers = response.headers_mut();
            if let Ok(v) = HeaderValue::from_str(&format!("error.{}", error_key)) {
                headers.insert(ERROR_HEADER, v);
            }
            if let Ok(v) = HeaderValue::from_str(entity_name) {
                headers.insert(PARAMS_HEADER, v);
            }
        }

        response
    }
}
