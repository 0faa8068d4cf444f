//! Handlers for brand endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::brand::{BrandListQuery, BrandRequest, BrandResponse};
use crate::api::extract::{EntityId, ValidatedJson};
use crate::domain::entities::Brand;
use crate::error::AppError;
use crate::state::AppState;

fn to_response(state: &AppState, brand: Brand) -> BrandResponse {
    let links = state.links.for_brand(&brand);
    BrandResponse::new(brand, links)
}

/// Lists brands, optionally only those of one company.
///
/// # Endpoint
///
/// `GET /api/brands?company=<name>`
pub async fn list_brands_handler(
    State(state): State<AppState>,
    Query(query): Query<BrandListQuery>,
) -> Result<Json<Vec<BrandResponse>>, AppError> {
    let brands = match query.company.as_deref().map(str::trim) {
        Some(company) if !company.is_empty() => {
            state.brand_service.get_all_brands_from_company(company).await?
        }
        _ => state.brand_service.get_all_brands().await?,
    };

    Ok(Json(
        brands
            .into_iter()
            .map(|brand| to_response(&state, brand))
            .collect(),
    ))
}

/// # Endpoint
///
/// `GET /api/brands/{id}`
pub async fn get_brand_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<BrandResponse>, AppError> {
    let brand = state.brand_service.get_brand(id).await?;
    Ok(Json(to_response(&state, brand)))
}

/// # Endpoint
///
/// `POST /api/brands`
///
/// # Errors
///
/// Returns 409 if the (brand, company) pair already exists.
pub async fn create_brand_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BrandRequest>,
) -> Result<impl IntoResponse, AppError> {
    let brand = state.brand_service.add_brand(payload.into()).await?;
    let location = state.links.brand_url(brand.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(to_response(&state, brand)),
    ))
}

/// # Endpoint
///
/// `PUT /api/brands/{id}`
///
/// # Errors
///
/// Returns 404 if the brand does not exist.
/// Returns 409 if another brand already has the new pair.
pub async fn update_brand_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<BrandRequest>,
) -> Result<Json<BrandResponse>, AppError> {
    let brand = state.brand_service.update_brand(id, payload.into()).await?;
    Ok(Json(to_response(&state, brand)))
}

/// # Endpoint
///
/// `DELETE /api/brands/{id}`
///
/// # Errors
///
/// Returns 400 while any car, soft-removed or not, references the brand.
pub async fn delete_brand_handler(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<BrandResponse>, AppError> {
    let brand = state.brand_service.remove_brand(id).await?;
    Ok(Json(BrandResponse::new(brand, Vec::new())))
}
