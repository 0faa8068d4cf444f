//! Handlers for car endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::car::{CarListQuery, CarRequest, CarResponse};
use crate::api::extract::{EntityId, ValidatedJson};
use crate::domain::entities::{Car, CarDraft};
use crate::error::AppError;
use crate::state::AppState;

fn to_response(state: &AppState, car: Car) -> CarResponse {
    let links = state.links.for_car(&car);
    CarResponse::new(car, links)
}

/// Lists active cars, optionally only those registered in one country.
///
/// # Endpoint
///
/// `GET /api/cars?country=<name>`
///
/// The country name is matched case-insensitively.
pub async fn list_cars_handler(
    State(state): State<AppState>,
    Query(query): Query<CarListQuery>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let cars = match query.country.as_deref().map(str::trim) {
        Some(country) if !country.is_empty() => {
            state.car_service.get_all_cars_from_country(country).await?
        }
        _ => state.car_service.get_all_cars().await?,
    };

    Ok(Json(
        cars.into_iter()
            .map(|car| to_response(&state, car))
            .collect(),
    ))
}

/// # Endpoint
///
/// `GET /api/cars/{id}`
///
/// # Errors
///
/// Returns 404 if the car does not exist or is soft-removed.
pub async fn get_car_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<CarResponse>, AppError> {
    let car = state.car_service.get_car(id).await?;
    Ok(Json(to_response(&state, car)))
}

/// Registers a car.
///
/// # Endpoint
///
/// `POST /api/cars`
///
/// # Request Body
///
/// ```json
/// { "brand": { "id": 2 }, "country": { "id": 3 } }
/// ```
///
/// # Errors
///
/// Returns 400 if a reference is missing or invalid.
/// Returns 404 if the referenced brand or country does not exist.
pub async fn create_car_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CarRequest>,
) -> Result<impl IntoResponse, AppError> {
    let car = state.car_service.add_car(CarDraft::from(&payload)).await?;
    let location = state.links.car_url(car.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(to_response(&state, car)),
    ))
}

/// Replaces the brand and country of a car.
///
/// # Endpoint
///
/// `PUT /api/cars/{id}`
pub async fn update_car_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<CarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    let car = state
        .car_service
        .update_car(id, CarDraft::from(&payload))
        .await?;

    Ok(Json(to_response(&state, car)))
}

/// Soft-removes a car. The sweep deletes it physically later.
///
/// # Endpoint
///
/// `DELETE /api/cars/{id}`
///
/// Responds with the flagged car.
pub async fn delete_car_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<CarResponse>, AppError> {
    let car = state.car_service.soft_remove_car(id).await?;
    Ok(Json(to_response(&state, car)))
}
