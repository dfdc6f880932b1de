//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgCityRepository, PgCountryRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let cities = PgCityRepository::new(pool.clone());
//!     let countries = PgCountryRepository::new(pool);
//! }
//! ```

pub mod city_repository;
pub mod country_repository;

pub use city_repository::PgCityRepository;
pub use country_repository::PgCountryRepository;
