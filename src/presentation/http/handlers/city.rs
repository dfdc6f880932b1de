//! City Handlers

use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use axum_extra::extract::{Query, QueryRejection};
use validator::Validate;

use crate::application::dto::{
    CityForm, CityPageParams, CityResponse, SearchByCountryNameParams, SearchByNameParams,
};
use crate::application::services::CityError;
use crate::domain::{PageRequest, CITY_SORTABLE_PROPERTIES};
use crate::presentation::http::{headers, pagination};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

const ENTITY_NAME: &str = "city";

fn city_error(e: CityError) -> AppError {
    match e {
        CityError::NotFound => AppError::NotFound("City not found".into()),
        CityError::NameRequired => AppError::Validation(format!("name: {}", e)),
        CityError::Internal(msg) => AppError::Internal(msg),
        e => match e.error_key() {
            Some(key) => AppError::bad_request_alert(e.to_string(), ENTITY_NAME, key),
            None => AppError::Internal(e.to_string()),
        },
    }
}

fn parse_city_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid city ID".into()))
}

/// Create a new city
pub async fn create_city(
    State(state): State<AppState>,
    auth: AuthUser,
    form: CityForm,
) -> Result<(StatusCode, HeaderMap, Json<CityResponse>), AppError> {
    tracing::debug!(login = %auth.login, ?form, "REST request to save city");

    form.validate().map_err(validation_error)?;

    let city = state
        .city_service
        .create_city(form.into())
        .await
        .map_err(city_error)?;

    let mut response_headers = headers::entity_created(
        &state.settings.application.name,
        ENTITY_NAME,
        &city.id.to_string(),
    );
    let location = HeaderValue::from_str(&format!("/api/cities/{}", city.id))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    response_headers.insert(header::LOCATION, location);

    Ok((StatusCode::CREATED, response_headers, Json(CityResponse::from(city))))
}

/// Partially update a city; absent fields keep their stored values
pub async fn update_city(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(city_id): Path<String>,
    form: CityForm,
) -> Result<(HeaderMap, Json<CityResponse>), AppError> {
    let city_id = parse_city_id(&city_id)?;
    tracing::debug!(login = %auth.login, city_id, ?form, "REST request to partially update city");

    form.validate().map_err(validation_error)?;

    let city = state
        .city_service
        .update_city(city_id, form.into())
        .await
        .map_err(city_error)?;

    let response_headers = headers::entity_updated(
        &state.settings.application.name,
        ENTITY_NAME,
        &city.id.to_string(),
    );

    Ok((response_headers, Json(CityResponse::from(city))))
}

/// Get city by ID
pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<CityResponse>, AppError> {
    let city_id = parse_city_id(&city_id)?;
    tracing::debug!(city_id, "REST request to get city");

    let city = state
        .city_service
        .get_city(city_id)
        .await
        .map_err(city_error)?;

    Ok(Json(CityResponse::from(city)))
}

/// One page of cities with `X-Total-Count` and `Link` headers
pub async fn list_cities(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<CityPageParams>, QueryRejection>,
) -> Result<(HeaderMap, Json<Vec<CityResponse>>), AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.to_string()))?;

    let page_request = PageRequest::parse(
        params.page,
        params.size,
        &params.sort,
        state.settings.pagination.limits(),
        CITY_SORTABLE_PROPERTIES,
    )
    .map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::debug!(%page_request, country_id = ?params.country_id, "REST request to get a page of cities");

    let page = state
        .city_service
        .list_cities(page_request, params.country_id)
        .await
        .map_err(city_error)?
        .map(CityResponse::from);

    let response_headers = pagination::pagination_headers(&uri, &page);
    Ok((response_headers, Json(page.content)))
}

/// Cities whose name contains the given text, ignoring case
pub async fn search_by_name(
    State(state): State<AppState>,
    params: Result<Query<SearchByNameParams>, QueryRejection>,
) -> Result<Json<Vec<CityResponse>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::debug!(name = %params.name, "REST request to search cities by name");

    let cities = state
        .city_service
        .search_by_name(&params.name)
        .await
        .map_err(city_error)?;

    Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
}

/// Cities whose country's name contains the given text, ignoring case
pub async fn search_by_country_name(
    State(state): State<AppState>,
    params: Result<Query<SearchByCountryNameParams>, QueryRejection>,
) -> Result<Json<Vec<CityResponse>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::debug!(country_name = %params.country_name, "REST request to search cities by country name");

    let cities = state
        .city_service
        .search_by_country_name(&params.country_name)
        .await
        .map_err(city_error)?;

    Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
}
