//! Handlers for country endpoints.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::country::{CountryRequest, CountryResponse};
use crate::api::extract::{EntityId, ValidatedJson};
use crate::domain::entities::Country;
use crate::error::AppError;
use crate::state::AppState;

fn to_response(state: &AppState, country: Country) -> CountryResponse {
    let links = state.links.for_country(&country);
    CountryResponse::new(country, links)
}

/// # Endpoint
///
/// `GET /api/countries`
pub async fn list_countries_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryResponse>>, AppError> {
    let countries = state.country_service.get_all_countries().await?;

    Ok(Json(
        countries
            .into_iter()
            .map(|country| to_response(&state, country))
            .collect(),
    ))
}

/// # Endpoint
///
/// `GET /api/countries/{id}`
pub async fn get_country_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<CountryResponse>, AppError> {
    let country = state.country_service.get_country(id).await?;
    Ok(Json(to_response(&state, country)))
}

/// # Endpoint
///
/// `POST /api/countries`
///
/// # Errors
///
/// Returns 409 if a country with the same name exists, ignoring case.
pub async fn create_country_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CountryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let country = state.country_service.add_country(payload.into()).await?;
    let location = state.links.country_url(country.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(to_response(&state, country)),
    ))
}

/// # Endpoint
///
/// `PUT /api/countries/{id}`
pub async fn update_country_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<CountryRequest>,
) -> Result<Json<CountryResponse>, AppError> {
    let country = state
        .country_service
        .update_country(id, payload.into())
        .await?;

    Ok(Json(to_response(&state, country)))
}

/// # Endpoint
///
/// `DELETE /api/countries/{id}`
///
/// # Errors
///
/// Returns 400 while any car references the country.
pub async fn delete_country_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<CountryResponse>, AppError> {
    let country = state.country_service.remove_country(id).await?;
    Ok(Json(CountryResponse::new(country, Vec::new())))
}
