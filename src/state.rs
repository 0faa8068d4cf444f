use std::sync::Arc;

use crate::api::links::LinkBuilder;
use crate::application::services::{AuthService, BrandService, CarService, CountryService};
use crate::domain::car_command::CarCommandSender;
use crate::domain::clock::Clock;
use crate::domain::repositories::{BrandRepository, CarRepository, CountryRepository};

/// Storage backends for the three aggregates.
///
/// The PostgreSQL backend uses one repository per table; the in-memory backend
/// passes the same [`crate::infrastructure::persistence::InMemoryStore`] three times.
#[derive(Clone)]
pub struct Repositories {
    pub cars: Arc<dyn CarRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub countries: Arc<dyn CountryRepository>,
}

/// Shared application state injected into all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService>,
    pub brand_service: Arc<BrandService>,
    pub country_service: Arc<CountryService>,
    pub auth_service: Arc<AuthService>,
    pub car_commands: Arc<dyn CarCommandSender>,
    pub links: Arc<LinkBuilder>,
}

impl AppState {
    /// Wires the services on top of `repositories`.
    ///
    /// Brand and country services share the car service so that removal checks
    /// see the same car storage the HTTP routes write to.
    pub fn new(
        repositories: Repositories,
        clock: Arc<dyn Clock>,
        car_commands: Arc<dyn CarCommandSender>,
        auth_service: Arc<AuthService>,
        links: LinkBuilder,
    ) -> Self {
        let car_service = Arc::new(CarService::new(
            repositories.cars,
            repositories.brands.clone(),
            repositories.countries.clone(),
            clock,
        ));
        let brand_service = Arc::new(BrandService::new(
            repositories.brands,
            car_service.clone(),
        ));
        let country_service = Arc::new(CountryService::new(
            repositories.countries,
            car_service.clone(),
        ));

        Self {
            car_service,
            brand_service,
            country_service,
            auth_service,
            car_commands,
            links: Arc::new(links),
        }
    }
}
