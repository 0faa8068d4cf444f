//! Hypermedia links attached to responses.

use url::Url;

use crate::domain::entities::{Brand, Car, Country, Link};

/// Builds absolute resource URLs under a public base URL.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    /// Uses `base` without its trailing slash, so `https://cars.example.com/`
    /// produces `https://cars.example.com/api/cars/1`.
    pub fn new(base: &Url) -> Self {
        Self {
            base: base.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn car_url(&self, id: i64) -> String {
        format!("{}/api/cars/{id}", self.base)
    }

    pub fn brand_url(&self, id: i64) -> String {
        format!("{}/api/brands/{id}", self.base)
    }

    pub fn country_url(&self, id: i64) -> String {
        format!("{}/api/countries/{id}", self.base)
    }

    /// `self`, `brand` and `country` relations.
    pub fn for_car(&self, car: &Car) -> Vec<Link> {
        vec![
            Link::new(self.car_url(car.id), "self"),
            Link::new(self.brand_url(car.brand.id), "brand"),
            Link::new(self.country_url(car.country.id), "country"),
        ]
    }

    pub fn for_brand(&self, brand: &Brand) -> Vec<Link> {
        vec![Link::new(self.brand_url(brand.id), "self")]
    }

    pub fn for_country(&self, country: &Country) -> Vec<Link> {
        vec![Link::new(self.country_url(country.id), "self")]
    }
}
