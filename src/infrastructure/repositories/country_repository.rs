//! Country Repository Implementation
//!
//! PostgreSQL implementation of the CountryRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Country, CountryRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CountryRow {
    id: i64,
    name: String,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Country {
            id: row.id,
            name: row.name,
        }
    }
}

/// PostgreSQL country repository implementation.
#[derive(Clone)]
pub struct PgCountryRepository {
    pool: PgPool,
}

impl PgCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn find_all(&self) -> Result<Vec<Country>, AppError> {
        let _timer = metrics::start_db_timer("select_all", "country");

        let rows = sqlx::query_as::<_, CountryRow>("SELECT id, name FROM country ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Country::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>("SELECT id, name FROM country WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Country::from))
    }
}
