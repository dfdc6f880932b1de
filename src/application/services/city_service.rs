//! City Service
//!
//! Create, partial update, lookup, listing and search of cities.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    City, CityPatch, CityRepository, Country, CountryRepository, Page, PageRequest,
};
use crate::shared::error::AppError;

/// City service trait
#[async_trait]
pub trait CityService: Send + Sync {
    /// Create a new city. The request must not carry an id.
    async fn create_city(&self, request: CityFormDto) -> Result<City, CityError>;

    /// Merge the supplied fields into the city identified by `path_id`.
    async fn update_city(&self, path_id: i64, request: CityFormDto) -> Result<City, CityError>;

    /// Get city by ID
    async fn get_city(&self, id: i64) -> Result<City, CityError>;

    /// One page of cities, optionally restricted to a country
    async fn list_cities(
        &self,
        page: PageRequest,
        country_id: Option<i64>,
    ) -> Result<Page<City>, CityError>;

    /// Case-insensitive substring search on the city name
    async fn search_by_name(&self, name: &str) -> Result<Vec<City>, CityError>;

    /// Case-insensitive substring search on the country name
    async fn search_by_country_name(&self, country_name: &str) -> Result<Vec<City>, CityError>;
}

/// Fields of a city create/update form. Every field is optional at this
/// level; which ones are required depends on the operation.
#[derive(Clone, Default)]
pub struct CityFormDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub country_id: Option<i64>,
    pub logo: Option<Vec<u8>>,
}

impl fmt::Debug for CityFormDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CityFormDto")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("country_id", &self.country_id)
            .field("logo_bytes", &self.logo.as_ref().map(Vec::len))
            .finish()
    }
}

/// City service errors
#[derive(Debug, thiserror::Error)]
pub enum CityError {
    #[error("A new city cannot already have an ID")]
    IdExists,

    #[error("Invalid id")]
    IdNull,

    #[error("Invalid ID")]
    IdInvalid,

    #[error("Entity not found")]
    IdNotFound,

    #[error("Country not found")]
    CountryNotFound,

    #[error("City name is required")]
    NameRequired,

    #[error("City not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CityError {
    /// Client-facing key for errors reported as bad-request alerts
    pub fn error_key(&self) -> Option<&'static str> {
        match self {
            CityError::IdExists => Some("idexists"),
            CityError::IdNull => Some("idnull"),
            CityError::IdInvalid => Some("idinvalid"),
            CityError::IdNotFound => Some("idnotfound"),
            CityError::CountryNotFound => Some("countrynotfound"),
            CityError::NameRequired | CityError::NotFound | CityError::Internal(_) => None,
        }
    }
}

impl From<AppError> for CityError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound(_) => CityError::NotFound,
            AppError::BadRequestAlert {
                error_key: "countrynotfound",
                ..
            } => CityError::CountryNotFound,
            e => CityError::Internal(e.to_string()),
        }
    }
}

/// CityService implementation
pub struct CityServiceImpl<C, K>
where
    C: CityRepository + ?Sized,
    K: CountryRepository + ?Sized,
{
    city_repo: Arc<C>,
    country_repo: Arc<K>,
}

impl<C, K> CityServiceImpl<C, K>
where
    C: CityRepository + ?Sized,
    K: CountryRepository + ?Sized,
{
    pub fn new(city_repo: Arc<C>, country_repo: Arc<K>) -> Self {
        Self {
            city_repo,
            country_repo,
        }
    }

    /// Look up the referenced country; a dangling id is a client error.
    async fn resolve_country(&self, country_id: Option<i64>) -> Result<Option<Country>, CityError> {
        let Some(country_id) = country_id else {
            return Ok(None);
        };

        self.country_repo
            .find_by_id(country_id)
            .await?
            .map(Some)
            .ok_or(CityError::CountryNotFound)
    }
}

#[async_trait]
impl<C, K> CityService for CityServiceImpl<C, K>
where
    C: CityRepository + ?Sized + 'static,
    K: CountryRepository + ?Sized + 'static,
{
    async fn create_city(&self, request: CityFormDto) -> Result<City, CityError> {
        tracing::debug!(?request, "Request to save city");

        if request.id.is_some() {
            return Err(CityError::IdExists);
        }

        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(CityError::NameRequired)?;
        let country = self.resolve_country(request.country_id).await?;

        let city = City::new(name, country, request.logo.unwrap_or_default());
        let created = self.city_repo.create(&city).await?;

        tracing::info!(city_id = created.id, "City created");
        Ok(created)
    }

    async fn update_city(&self, path_id: i64, request: CityFormDto) -> Result<City, CityError> {
        tracing::debug!(path_id, ?request, "Request to update city");

        let id = request.id.ok_or(CityError::IdNull)?;
        if id != path_id {
            return Err(CityError::IdInvalid);
        }
        if request.name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(CityError::NameRequired);
        }
        if !self.city_repo.exists_by_id(id).await? {
            return Err(CityError::IdNotFound);
        }

        let mut city = self
            .city_repo
            .find_by_id(id)
            .await?
            .ok_or(CityError::NotFound)?;

        let patch = CityPatch {
            name: request.name,
            country: self.resolve_country(request.country_id).await?,
            logo: request.logo,
        };
        if patch.is_empty() {
            tracing::debug!(city_id = id, "Partial update carries no changes");
            return Ok(city);
        }
        city.merge(patch);

        let updated = self.city_repo.update(&city).await?;

        tracing::info!(city_id = updated.id, "City updated");
        Ok(updated)
    }

    async fn get_city(&self, id: i64) -> Result<City, CityError> {
        tracing::debug!(id, "Request to get city");

        self.city_repo
            .find_by_id(id)
            .await?
            .ok_or(CityError::NotFound)
    }

    async fn list_cities(
        &self,
        page: PageRequest,
        country_id: Option<i64>,
    ) -> Result<Page<City>, CityError> {
        tracing::debug!(%page, ?country_id, "Request to get a page of cities");

        let result = match country_id {
            Some(country_id) => self.city_repo.find_all_by_country(&page, country_id).await?,
            None => self.city_repo.find_all(&page).await?,
        };
        Ok(result)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<City>, CityError> {
        tracing::debug!(name, "Request to search cities by name");
        Ok(self.city_repo.search_by_name(name).await?)
    }

    async fn search_by_country_name(&self, country_name: &str) -> Result<Vec<City>, CityError> {
        tracing::debug!(country_name, "Request to search cities by country name");
        Ok(self.city_repo.search_by_country_name(country_name).await?)
    }
}
