//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CityService**: City create, partial update, lookup, paging and search
//! - **CountryService**: Country reference list

pub mod city_service;
pub mod country_service;

pub use city_service::{CityError, CityFormDto, CityService, CityServiceImpl};
pub use country_service::{CountryError, CountryService, CountryServiceImpl};
