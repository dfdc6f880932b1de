//! # Domain Entities
//!
//! Core domain entities. Both map directly to their database tables.
//!
//! - **Country**: read-only reference data
//! - **City**: a named city with a logo image, optionally assigned to a country
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod city;
mod country;

pub use city::{City, CityPatch, CityRepository, CITY_SORTABLE_PROPERTIES};
pub use country::{Country, CountryRepository};

#[cfg(test)]
pub use city::MockCityRepository;
#[cfg(test)]
pub use country::MockCountryRepository;
