//! City entity, partial-update patch, and repository trait.
//!
//! Maps to the `city` table. A city optionally references one country
//! through the nullable `country_id` foreign key.

use async_trait::async_trait;

use super::country::Country;
use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// Properties a city listing may be sorted by.
pub const CITY_SORTABLE_PROPERTIES: &[&str] = &["id", "name"];

/// A city with its logo image and owning country.
///
/// Maps to the `city` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(255) NOT NULL
/// - logo: BYTEA NOT NULL DEFAULT ''
/// - country_id: BIGINT NULL REFERENCES country(id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// Database-generated id (0 until persisted)
    pub id: i64,

    pub name: String,

    /// Raw image bytes; empty when no logo was uploaded
    pub logo: Vec<u8>,

    /// Owning country, `None` until one is assigned
    pub country: Option<Country>,
}

impl City {
    /// A not-yet-persisted city.
    pub fn new(name: impl Into<String>, country: Option<Country>, logo: Vec<u8>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            logo,
            country,
        }
    }

    pub fn country_id(&self) -> Option<i64> {
        self.country.as_ref().map(|c| c.id)
    }

    /// Overwrite only the fields present in `patch`.
    ///
    /// An empty logo counts as absent, so a form submitted without a new
    /// file keeps the stored image.
    pub fn merge(&mut self, patch: CityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(country) = patch.country {
            self.country = Some(country);
        }
        if let Some(logo) = patch.logo.filter(|logo| !logo.is_empty()) {
            self.logo = logo;
        }
    }
}

/// Fields supplied by a partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityPatch {
    pub name: Option<String>,
    pub country: Option<Country>,
    pub logo: Option<Vec<u8>>,
}

impl CityPatch {
    /// True when merging would change nothing, so the write can be skipped.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.country.is_none()
            && self.logo.as_ref().map_or(true, |logo| logo.is_empty())
    }
}

/// Repository trait for City data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// One page of all cities.
    async fn find_all(&self, page: &PageRequest) -> Result<Page<City>, AppError>;

    /// One page of the cities belonging to a country.
    async fn find_all_by_country(
        &self,
        page: &PageRequest,
        country_id: i64,
    ) -> Result<Page<City>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<City>, AppError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Cities whose name contains `name`, ignoring case.
    async fn search_by_name(&self, name: &str) -> Result<Vec<City>, AppError>;

    /// Cities whose country's name contains `country_name`, ignoring case.
    async fn search_by_country_name(&self, country_name: &str) -> Result<Vec<City>, AppError>;

    /// Insert a new city; the returned entity carries the generated id.
    async fn create(&self, city: &City) -> Result<City, AppError>;

    /// Persist all fields of an existing city.
    ///
    /// Returns `AppError::NotFound` if no row with `city.id` exists.
    async fn update(&self, city: &City) -> Result<City, AppError>;

    async fn count(&self) -> Result<u64, AppError>;
}
