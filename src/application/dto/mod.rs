//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    CityForm, CityPageParams, LogoUpload, SearchByCountryNameParams, SearchByNameParams,
};
pub use response::{CityResponse, CountryResponse};
