//! DTOs for country endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{Country, Link, NewCountry};

/// Two or three ASCII letters, any case.
static ABBREVIATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}$").unwrap());

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CountryRequest {
    #[validate(
        length(min = 1, max = 100, message = "countryName must have between 1 and 100 characters"),
        custom(function = "not_blank", message = "countryName must not be blank")
    )]
    pub country_name: String,

    #[validate(regex(
        path = "*ABBREVIATION_REGEX",
        message = "countryAbbreviation must be 2 or 3 letters"
    ))]
    pub country_abbreviation: String,
}

impl From<CountryRequest> for NewCountry {
    fn from(request: CountryRequest) -> Self {
        NewCountry::new(&request.country_name, &request.country_abbreviation)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryResponse {
    pub id: i64,
    pub country_name: String,
    pub country_abbreviation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl CountryResponse {
    pub fn new(country: Country, links: Vec<Link>) -> Self {
        Self {
            id: country.id,
            country_name: country.country_name,
            country_abbreviation: country.country_abbreviation,
            links,
        }
    }
}
