//! # Domain Layer
//!
//! Core entities, value objects and repository contracts of the city
//! directory. Independent of HTTP and database concerns.
//!
//! ## Structure
//!
//! - **entities**: Country, City and their repository traits
//! - **value_objects**: authorities, page requests and pages

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
