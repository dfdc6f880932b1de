//! Custom Extractors
//!
//! Axum extractors for the authenticated caller and the multipart city form.

use axum::{
    extract::{FromRequest, FromRequestParts, Multipart, Request},
    http::{request::Parts, StatusCode},
};

use crate::application::dto::{CityForm, LogoUpload};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;

/// The caller set by [`auth_middleware`](crate::presentation::middleware::auth_middleware).
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}

/// Browser `FormData` sends `""`, `"null"` or `"undefined"` for unset values.
fn is_unset(raw: &str) -> bool {
    matches!(raw.trim(), "" | "null" | "undefined")
}

/// Parse an optional numeric form field; unset values mean absent.
fn parse_optional_id(field: &str, raw: &str) -> Result<Option<i64>, AppError> {
    match raw.trim() {
        value if is_unset(value) => Ok(None),
        value => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", field, value))),
    }
}

/// A `logo` part counts only when it is a file with real content. A plain
/// text part, or a file holding an unset placeholder, means no new logo.
fn logo_upload(
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
) -> Option<LogoUpload> {
    if file_name.is_none() || std::str::from_utf8(&bytes).is_ok_and(is_unset) {
        return None;
    }
    Some(LogoUpload {
        file_name,
        content_type,
        bytes,
    })
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart body: {}", e.body_text()))
}

impl<S> FromRequest<S> for CityForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut form = CityForm::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "id" => {
                    let raw = field.text().await.map_err(malformed)?;
                    form.id = parse_optional_id("id", &raw)?;
                }
                "name" => form.name = Some(field.text().await.map_err(malformed)?),
                "country" => {
                    let raw = field.text().await.map_err(malformed)?;
                    form.country_id = parse_optional_id("country", &raw)?;
                }
                "logo" => {
                    let file_name = field.file_name().map(str::to_owned);
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await.map_err(|e| {
                        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                            return AppError::BadRequest("Logo exceeds the upload limit".into());
                        }
                        AppError::Internal(format!("Failed to read logo: {}", e))
                    })?;
                    form.logo = logo_upload(file_name, content_type, bytes.to_vec());
                    if form.logo.is_none() {
                        tracing::debug!("Ignoring logo part without file content");
                    }
                }
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}
