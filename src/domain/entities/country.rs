//! Domain entity representing a country of registration.

use super::Entity;

/// A country in which cars are registered.
///
/// Country names are globally unique, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    pub country_name: String,
    pub country_abbreviation: String,
}

impl Country {
    pub fn new(
        id: i64,
        country_name: impl Into<String>,
        country_abbreviation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            country_name: country_name.into(),
            country_abbreviation: country_abbreviation.into(),
        }
    }
}

impl Entity for Country {
    type New = NewCountry;
    const KIND: &'static str = "Country";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input data for creating or replacing a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
    pub country_name: String,
    pub country_abbreviation: String,
}

impl NewCountry {
    /// Trims the name and upper-cases the abbreviation.
    pub fn new(country_name: &str, country_abbreviation: &str) -> Self {
        Self {
            country_name: country_name.trim().to_string(),
            country_abbreviation: country_abbreviation.trim().to_ascii_uppercase(),
        }
    }
}
