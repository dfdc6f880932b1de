//! HTTP API

pub mod extractors;
pub mod handlers;
pub mod headers;
pub mod pagination;
pub mod routes;
