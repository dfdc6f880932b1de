//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **Authority**: named capability carried in the caller's token
//! - **PageRequest / Page**: pagination and sorting of listings

mod authority;
mod pagination;

pub use authority::*;
pub use pagination::*;
