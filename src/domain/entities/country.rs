//! Country entity and repository trait.
//!
//! Maps to the `country` table. Countries are reference data: this service
//! reads them but never creates or modifies them.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// A country a city can belong to.
///
/// Maps to the `country` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(255) NOT NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

impl Country {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Repository trait for Country data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// All countries ordered by id.
    async fn find_all(&self) -> Result<Vec<Country>, AppError>;

    /// Find a country by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, AppError>;
}
