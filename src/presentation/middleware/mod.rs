//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod authority;
pub mod cors;
pub mod logging;
pub mod metrics;

pub use auth::{auth_middleware, decode_token, AuthUser, Claims};
pub use authority::{require_admin, require_editor};
pub use metrics::track_metrics;
