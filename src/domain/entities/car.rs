//! Domain entity representing a registered car.

use chrono::{DateTime, Utc};

use super::{Brand, Country, Entity};

/// A registered vehicle.
///
/// A stored car always references an existing [`Brand`] and [`Country`]; both are
/// embedded here as resolved values. Soft-removed cars stay in storage until the
/// sweep deletes them but are hidden from normal reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: i64,
    pub brand: Brand,
    pub country: Country,
    pub registration: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub soft_removed: bool,
}

impl Entity for Car {
    type New = NewCar;
    const KIND: &'static str = "Car";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fully resolved input for inserting a car.
///
/// Built by the car service once references are validated and timestamps assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub brand: Brand,
    pub country: Country,
    pub registration: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Unvalidated car input: only the brand and country references.
///
/// A missing reference is `None`. Validation happens in
/// [`crate::application::services::CarService`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarDraft {
    pub brand_id: Option<i64>,
    pub country_id: Option<i64>,
}

impl CarDraft {
    pub fn new(brand_id: i64, country_id: i64) -> Self {
        Self {
            brand_id: Some(brand_id),
            country_id: Some(country_id),
        }
    }
}
