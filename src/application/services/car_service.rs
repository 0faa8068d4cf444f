//! Car lifecycle service.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{Brand, Car, CarDraft, Country, NewCar};
use crate::domain::repositories::{
    BrandRepository, CarRepository, CountryRepository, record_not_found,
};
use crate::error::AppError;

/// Owns the car lifecycle: `add` → active → `soft_remove` → swept.
///
/// Every mutation validates the brand and country references before touching
/// storage. Reads that serve clients hide soft-removed cars; the referential
/// queries used by brand and country removal do not.
pub struct CarService {
    cars: Arc<dyn CarRepository>,
    brands: Arc<dyn BrandRepository>,
    countries: Arc<dyn CountryRepository>,
    clock: Arc<dyn Clock>,
}

impl CarService {
    pub fn new(
        cars: Arc<dyn CarRepository>,
        brands: Arc<dyn BrandRepository>,
        countries: Arc<dyn CountryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cars,
            brands,
            countries,
            clock,
        }
    }

    /// Lists every car that is not soft-removed.
    pub async fn get_all_cars(&self) -> Result<Vec<Car>, AppError> {
        let cars = self.cars.get_all().await?;
        Ok(cars.into_iter().filter(|car| !car.soft_removed).collect())
    }

    /// Retrieves an active car.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist or is soft-removed.
    pub async fn get_car(&self, id: i64) -> Result<Car, AppError> {
        match self.cars.get(id).await? {
            Some(car) if !car.soft_removed => Ok(car),
            _ => Err(car_not_found(id)),
        }
    }

    /// Lists active cars registered in a country, matching the name case-insensitively.
    pub async fn get_all_cars_from_country(
        &self,
        country_name: &str,
    ) -> Result<Vec<Car>, AppError> {
        let cars = self.cars.find_by_country_name(country_name.trim()).await?;
        Ok(cars.into_iter().filter(|car| !car.soft_removed).collect())
    }

    /// Lists every stored car of a brand, soft-removed ones included.
    pub async fn get_all_cars_from_brand(&self, brand_id: i64) -> Result<Vec<Car>, AppError> {
        self.cars.find_by_brand(brand_id).await
    }

    /// Lists every stored car registered in a country, soft-removed ones included.
    pub async fn get_all_cars_from_country_id(
        &self,
        country_id: i64,
    ) -> Result<Vec<Car>, AppError> {
        self.cars.find_by_country(country_id).await
    }

    pub async fn get_all_soft_removed_cars(&self) -> Result<Vec<Car>, AppError> {
        self.cars.find_soft_removed().await
    }

    /// Creates a car from validated references.
    ///
    /// Creation, registration and last-updated timestamps all receive the same
    /// instant from the injected clock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if a reference is missing or has an id below 1.
    /// Returns [`AppError::NotFound`] if the referenced brand or country does not exist.
    pub async fn add_car(&self, draft: CarDraft) -> Result<Car, AppError> {
        let (brand, country) = self.resolve_references(&draft).await?;
        let now = self.clock.now();

        let car = self
            .cars
            .add(NewCar {
                brand,
                country,
                registration: now,
                created_at: now,
                last_updated: now,
            })
            .await?;

        tracing::info!(
            car_id = car.id,
            brand_id = car.brand.id,
            country_id = car.country.id,
            "Car added"
        );

        Ok(car)
    }

    /// Replaces the references of an active car.
    ///
    /// Creation and registration timestamps are kept; last-updated moves to now.
    ///
    /// # Errors
    ///
    /// Same reference errors as [`CarService::add_car`], then
    /// [`AppError::NotFound`] if the car does not exist or is soft-removed.
    pub async fn update_car(&self, id: i64, draft: CarDraft) -> Result<Car, AppError> {
        let (brand, country) = self.resolve_references(&draft).await?;
        let mut car = self.get_car(id).await?;

        car.brand = brand;
        car.country = country;
        car.last_updated = self.clock.now();

        let car = self.cars.update(car).await?;

        tracing::info!(car_id = car.id, "Car updated");

        Ok(car)
    }

    /// Flags an active car for removal by the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist or is already soft-removed.
    pub async fn soft_remove_car(&self, id: i64) -> Result<Car, AppError> {
        let mut car = self.get_car(id).await?;
        car.soft_removed = true;

        let car = self.cars.update(car).await?;

        tracing::info!(car_id = car.id, "Car soft-removed");

        Ok(car)
    }

    /// Physically deletes a car whether or not it is soft-removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist.
    pub async fn remove_car(&self, id: i64) -> Result<Car, AppError> {
        if self.cars.get(id).await?.is_none() {
            return Err(car_not_found(id));
        }

        let car = self.cars.delete(id).await?;

        tracing::info!(car_id = car.id, "Car removed");

        Ok(car)
    }

    async fn resolve_references(&self, draft: &CarDraft) -> Result<(Brand, Country), AppError> {
        let brand_id = match draft.brand_id {
            Some(id) if id >= 1 => id,
            _ => {
                return Err(AppError::bad_request(
                    "The car must reference a brand with a valid id",
                ));
            }
        };
        let country_id = match draft.country_id {
            Some(id) if id >= 1 => id,
            _ => {
                return Err(AppError::bad_request(
                    "The car must reference a country with a valid id",
                ));
            }
        };

        let brand = self
            .brands
            .get(brand_id)
            .await?
            .ok_or_else(|| record_not_found::<Brand>(brand_id))?;
        let country = self
            .countries
            .get(country_id)
            .await?
            .ok_or_else(|| record_not_found::<Country>(country_id))?;

        Ok((brand, country))
    }
}

fn car_not_found(id: i64) -> AppError {
    record_not_found::<Car>(id)
}
