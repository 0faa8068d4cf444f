//! DTOs for brand endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{Brand, Link, NewBrand};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BrandRequest {
    #[validate(
        length(min = 1, max = 100, message = "brand must have between 1 and 100 characters"),
        custom(function = "not_blank", message = "brand must not be blank")
    )]
    pub brand: String,

    #[validate(
        length(min = 1, max = 100, message = "company must have between 1 and 100 characters"),
        custom(function = "not_blank", message = "company must not be blank")
    )]
    pub company: String,
}

impl From<BrandRequest> for NewBrand {
    fn from(request: BrandRequest) -> Self {
        NewBrand::new(&request.brand, &request.company)
    }
}

/// Optional `?company=` filter for `GET /api/brands`.
#[derive(Debug, Deserialize)]
pub struct BrandListQuery {
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    pub id: i64,
    pub brand: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl BrandResponse {
    pub fn new(brand: Brand, links: Vec<Link>) -> Self {
        Self {
            id: brand.id,
            brand: brand.brand,
            company: brand.company,
            links,
        }
    }
}
