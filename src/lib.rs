//! # City Directory Library
//!
//! REST backend for a directory of cities, each optionally belonging to a
//! country and carrying a logo image:
//! - Paginated, sortable city listing with `Link` headers
//! - Case-insensitive search by city or country name
//! - Role-gated create (`ROLE_ADMIN`) and partial update (`ROLE_EDITOR`)
//! - PostgreSQL storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, value objects and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database repositories and metrics
//! - **Presentation Layer**: HTTP handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! city_directory/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and repository traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database and metrics implementations
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
