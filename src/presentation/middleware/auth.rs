//! Authentication Middleware
//!
//! JWT validation middleware for protected routes. Tokens are HS256-signed
//! by the identity service and carry the caller's authorities in the `auth`
//! claim.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Authorities, Authority};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (login)
    pub sub: String,
    /// Comma-separated authorities, e.g. `ROLE_ADMIN,ROLE_USER`
    #[serde(default)]
    pub auth: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authenticated caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub login: String,
    pub authorities: Authorities,
}

impl AuthUser {
    pub fn has_authority(&self, authority: Authority) -> bool {
        self.authorities.contains(authority)
    }
}

/// Verify a bearer token and build the caller it identifies.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })?;

    if token_data.claims.sub.is_empty() {
        return Err(AppError::Unauthorized("Invalid token claims".into()));
    }

    Ok(AuthUser {
        authorities: Authorities::parse_claim(&token_data.claims.auth),
        login: token_data.claims.sub,
    })
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Authorization(bearer) = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let user = decode_token(bearer.token(), &state.settings.jwt.secret)?;
    tracing::trace!(login = %user.login, "Authenticated request");

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
