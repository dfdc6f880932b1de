//! Infrastructure Layer
//!
//! Implementations for external concerns:
//! - PostgreSQL pool, migrations and repositories
//! - Prometheus metrics registry

pub mod database;
pub mod metrics;
pub mod repositories;
