//! Authority guards
//!
//! Per-route checks layered behind [`auth_middleware`](super::auth_middleware).
//! Matching is exact: holding `ROLE_ADMIN` does not grant `ROLE_EDITOR`.

use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::domain::Authority;
use crate::shared::error::AppError;

async fn require_authority(
    authority: Authority,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    if !user.has_authority(authority) {
        tracing::warn!(login = %user.login, required = %authority, "Access denied");
        return Err(AppError::Forbidden(format!("{} required", authority)));
    }

    Ok(next.run(request).await)
}

/// Only callers holding `ROLE_ADMIN` pass
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    require_authority(Authority::Admin, request, next).await
}

/// Only callers holding `ROLE_EDITOR` pass
pub async fn require_editor(request: Request, next: Next) -> Result<Response, AppError> {
    require_authority(Authority::Editor, request, next).await
}
