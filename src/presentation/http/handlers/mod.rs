//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod city;
pub mod country;
pub mod health;
