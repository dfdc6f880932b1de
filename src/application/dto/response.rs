//! Response DTOs
//!
//! Data structures for API response bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::domain::{City, Country};

/// Country response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
        }
    }
}

/// City response. The logo travels as standard base64.
#[derive(Debug, Clone, Serialize)]
pub struct CityResponse {
    pub id: i64,
    pub name: String,
    pub logo: String,
    pub country: Option<CountryResponse>,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            logo: STANDARD.encode(&city.logo),
            country: city.country.map(CountryResponse::from),
        }
    }
}
