//! DTOs for car endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::brand::BrandResponse;
use super::country::CountryResponse;
use crate::domain::entities::{Car, CarDraft, Link};

/// Reference to an existing brand or country by id.
///
/// Extra fields such as a full brand body are accepted and ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct EntityRef {
    #[validate(range(min = 1, message = "referenced ids must be greater than zero"))]
    pub id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarRequest {
    #[validate(required(message = "brand is required"), nested)]
    pub brand: Option<EntityRef>,

    #[validate(required(message = "country is required"), nested)]
    pub country: Option<EntityRef>,
}

impl From<&CarRequest> for CarDraft {
    fn from(request: &CarRequest) -> Self {
        CarDraft {
            brand_id: request.brand.map(|b| b.id),
            country_id: request.country.map(|c| c.id),
        }
    }
}

/// Optional `?country=` filter for `GET /api/cars`.
#[derive(Debug, Deserialize)]
pub struct CarListQuery {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: i64,
    pub brand: BrandResponse,
    pub country: CountryResponse,
    pub registration: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub soft_removed: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl CarResponse {
    /// Nested brand and country are embedded without their own links.
    pub fn new(car: Car, links: Vec<Link>) -> Self {
        Self {
            id: car.id,
            brand: BrandResponse::new(car.brand, Vec::new()),
            country: CountryResponse::new(car.country, Vec::new()),
            registration: car.registration,
            created_at: car.created_at,
            last_updated: car.last_updated,
            soft_removed: car.soft_removed,
            links,
        }
    }
}
