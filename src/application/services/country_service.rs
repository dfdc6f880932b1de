//! Country Service
//!
//! Read-only access to the country reference list.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Country, CountryRepository};
use crate::shared::error::AppError;

/// Country service trait
#[async_trait]
pub trait CountryService: Send + Sync {
    /// Every country, ordered by id
    async fn list_countries(&self) -> Result<Vec<Country>, CountryError>;
}

/// Country service errors
#[derive(Debug, thiserror::Error)]
pub enum CountryError {
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for CountryError {
    fn from(e: AppError) -> Self {
        CountryError::Internal(e.to_string())
    }
}

/// CountryService implementation
pub struct CountryServiceImpl<K: CountryRepository + ?Sized> {
    country_repo: Arc<K>,
}

impl<K: CountryRepository + ?Sized> CountryServiceImpl<K> {
    pub fn new(country_repo: Arc<K>) -> Self {
        Self { country_repo }
    }
}

#[async_trait]
impl<K: CountryRepository + ?Sized + 'static> CountryService for CountryServiceImpl<K> {
    async fn list_countries(&self) -> Result<Vec<Country>, CountryError> {
        tracing::debug!("Request to get all countries");
        Ok(self.country_repo.find_all().await?)
    }
}
