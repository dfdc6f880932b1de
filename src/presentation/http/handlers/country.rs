//! Country Handlers

use axum::{extract::State, Json};

use crate::application::dto::CountryResponse;
use crate::application::services::CountryError;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Every country, ordered by id
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryResponse>>, AppError> {
    tracing::debug!("REST request to get all countries");

    let countries = state
        .country_service
        .list_countries()
        .await
        .map_err(|e| match e {
            CountryError::Internal(msg) => AppError::Internal(msg),
        })?;

    Ok(Json(countries.into_iter().map(CountryResponse::from).collect()))
}
