//! City Repository Implementation
//!
//! PostgreSQL implementation of the CityRepository trait. Every read joins
//! `country` so the returned entity carries its country's name.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{City, CityRepository, Country, Page, PageRequest};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

const SELECT_CITY: &str = r#"
    SELECT c.id, c.name, c.logo, c.country_id, k.name AS country_name
    FROM city c
    LEFT JOIN country k ON k.id = c.country_id
"#;

/// Database row: a city joined with its (optional) country.
#[derive(Debug, sqlx::FromRow)]
struct CityRow {
    id: i64,
    name: String,
    logo: Vec<u8>,
    country_id: Option<i64>,
    country_name: Option<String>,
}

impl CityRow {
    fn into_city(self) -> City {
        let country = match (self.country_id, self.country_name) {
            (Some(id), Some(name)) => Some(Country { id, name }),
            _ => None,
        };
        City {
            id: self.id,
            name: self.name,
            logo: self.logo,
            country,
        }
    }
}

/// Escape LIKE wildcards and wrap the term for a "contains" match.
///
/// Used with `ESCAPE '\'` so `%` and `_` typed by the user match literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// ORDER BY clause for a page request. Only whitelisted columns are emitted,
/// and `c.id` is appended as a tiebreaker so paging is stable.
fn order_by(page: &PageRequest) -> String {
    let mut terms: Vec<String> = page
        .sort
        .iter()
        .filter_map(|order| {
            let column = match order.property.as_str() {
                "id" => "c.id",
                "name" => "c.name",
                _ => return None,
            };
            Some(format!("{} {}", column, order.direction.as_sql()))
        })
        .collect();

    if !page.sort.iter().any(|order| order.property == "id") {
        terms.push("c.id ASC".to_string());
    }

    terms.join(", ")
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::bad_request_alert("Country not found", "city", "countrynotfound")
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL city repository implementation.
#[derive(Clone)]
pub struct PgCityRepository {
    pool: PgPool,
}

impl PgCityRepository {
    /// Create a new PgCityRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_by_country(&self, country_id: i64) -> Result<u64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM city WHERE country_id = $1")
            .bind(country_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

#[async_trait]
impl CityRepository for PgCityRepository {
    async fn find_all(&self, page: &PageRequest) -> Result<Page<City>, AppError> {
        let _timer = metrics::start_db_timer("select_page", "city");

        let sql = format!("{} ORDER BY {} LIMIT $1 OFFSET $2", SELECT_CITY, order_by(page));
        let rows = sqlx::query_as::<_, CityRow>(&sql)
            .bind(i64::from(page.size))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count().await?;
        let content = rows.into_iter().map(CityRow::into_city).collect();
        Ok(Page::new(content, page, total))
    }

    async fn find_all_by_country(
        &self,
        page: &PageRequest,
        country_id: i64,
    ) -> Result<Page<City>, AppError> {
        let _timer = metrics::start_db_timer("select_page_by_country", "city");

        let sql = format!(
            "{} WHERE c.country_id = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            SELECT_CITY,
            order_by(page)
        );
        let rows = sqlx::query_as::<_, CityRow>(&sql)
            .bind(country_id)
            .bind(i64::from(page.size))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count_by_country(country_id).await?;
        let content = rows.into_iter().map(CityRow::into_city).collect();
        Ok(Page::new(content, page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<City>, AppError> {
        let _timer = metrics::start_db_timer("select", "city");

        let sql = format!("{} WHERE c.id = $1", SELECT_CITY);
        let row = sqlx::query_as::<_, CityRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CityRow::into_city))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM city WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<City>, AppError> {
        let _timer = metrics::start_db_timer("search_name", "city");

        let sql = format!(r"{} WHERE c.name ILIKE $1 ESCAPE '\' ORDER BY c.id", SELECT_CITY);
        let rows = sqlx::query_as::<_, CityRow>(&sql)
            .bind(contains_pattern(name))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CityRow::into_city).collect())
    }

    async fn search_by_country_name(&self, country_name: &str) -> Result<Vec<City>, AppError> {
        let _timer = metrics::start_db_timer("search_country_name", "city");

        let sql = format!(r"{} WHERE k.name ILIKE $1 ESCAPE '\' ORDER BY c.id", SELECT_CITY);
        let rows = sqlx::query_as::<_, CityRow>(&sql)
            .bind(contains_pattern(country_name))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CityRow::into_city).collect())
    }

    async fn create(&self, city: &City) -> Result<City, AppError> {
        let _timer = metrics::start_db_timer("insert", "city");

        let row = sqlx::query_as::<_, CityRow>(
            r#"
            WITH inserted AS (
                INSERT INTO city (name, logo, country_id)
                VALUES ($1, $2, $3)
                RETURNING id, name, logo, country_id
            )
            SELECT i.id, i.name, i.logo, i.country_id, k.name AS country_name
            FROM inserted i
            LEFT JOIN country k ON k.id = i.country_id
            "#,
        )
        .bind(&city.name)
        .bind(&city.logo)
        .bind(city.country_id())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_city())
    }

    async fn update(&self, city: &City) -> Result<City, AppError> {
        let _timer = metrics::start_db_timer("update", "city");

        let row = sqlx::query_as::<_, CityRow>(
            r#"
            WITH updated AS (
                UPDATE city
                SET name = $2,
                    logo = $3,
                    country_id = $4
                WHERE id = $1
                RETURNING id, name, logo, country_id
            )
            SELECT u.id, u.name, u.logo, u.country_id, k.name AS country_name
            FROM updated u
            LEFT JOIN country k ON k.id = u.country_id
            "#,
        )
        .bind(city.id)
        .bind(&city.name)
        .bind(&city.logo)
        .bind(city.country_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound(format!("City with id {} not found", city.id)))?;

        Ok(row.into_city())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM city")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}
