//! Country management service.

use std::sync::Arc;

use crate::application::services::CarService;
use crate::domain::entities::{Country, NewCountry};
use crate::domain::repositories::{CountryRepository, record_not_found};
use crate::error::AppError;

/// Service for managing countries of registration.
///
/// Country names are unique ignoring case. A country referenced by any stored
/// car cannot be removed.
pub struct CountryService {
    repository: Arc<dyn CountryRepository>,
    cars: Arc<CarService>,
}

impl CountryService {
    pub fn new(repository: Arc<dyn CountryRepository>, cars: Arc<CarService>) -> Self {
        Self { repository, cars }
    }

    pub async fn get_all_countries(&self) -> Result<Vec<Country>, AppError> {
        self.repository.get_all().await
    }

    /// Checks that country storage is reachable.
    pub async fn storage_health_check(&self) -> Result<(), AppError> {
        self.repository.health_check().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    pub async fn get_country(&self, id: i64) -> Result<Country, AppError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| country_not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if a country with the same name exists.
    pub async fn add_country(&self, new_country: NewCountry) -> Result<Country, AppError> {
        if self
            .repository
            .country_already_exists(&new_country.country_name)
            .await?
            .is_some()
        {
            return Err(country_already_exists(&new_country.country_name));
        }

        let country = self.repository.add(new_country).await?;

        tracing::info!(
            country_id = country.id,
            country = %country.country_name,
            "Country added"
        );

        Ok(country)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::AlreadyExists`] if another country has the new name.
    pub async fn update_country(&self, id: i64, update: NewCountry) -> Result<Country, AppError> {
        self.get_country(id).await?;

        if let Some(existing) = self
            .repository
            .country_already_exists(&update.country_name)
            .await?
            && existing.id != id
        {
            return Err(country_already_exists(&update.country_name));
        }

        let country = self
            .repository
            .update(Country {
                id,
                country_name: update.country_name,
                country_abbreviation: update.country_abbreviation,
            })
            .await?;

        tracing::info!(country_id = country.id, "Country updated");

        Ok(country)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::BadRequest`] if any stored car references the country.
    pub async fn remove_country(&self, id: i64) -> Result<Country, AppError> {
        self.get_country(id).await?;

        let cars = self.cars.get_all_cars_from_country_id(id).await?;
        if !cars.is_empty() {
            return Err(AppError::bad_request(format!(
                "Country with id {id} cannot be removed because {} car(s) reference it",
                cars.len()
            )));
        }

        let country = self.repository.delete(id).await?;

        tracing::info!(country_id = country.id, "Country removed");

        Ok(country)
    }
}

fn country_not_found(id: i64) -> AppError {
    record_not_found::<Country>(id)
}

fn country_already_exists(name: &str) -> AppError {
    AppError::already_exists(format!("Country {name} already exists"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SystemClock;
    use crate::domain::entities::{Brand, Car};
    use crate::domain::repositories::{MockBrandRepo, MockCarRepo, MockCountryRepo};
    use chrono::Utc;

    fn car_service(cars: MockCarRepo) -> Arc<CarService> {
        Arc::new(CarService::new(
            Arc::new(cars),
            Arc::new(MockBrandRepo::new()),
            Arc::new(MockCountryRepo::new()),
            Arc::new(SystemClock),
        ))
    }

    #[tokio::test]
    async fn test_storage_health_check_reads_no_rows() {
        let mut repo = MockCountryRepo::new();
        repo.expect_health_check().times(1).returning(|| Ok(()));
        repo.expect_get_all().never();

        let service = CountryService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        assert!(service.storage_health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_storage_health_check_reports_failure() {
        let mut repo = MockCountryRepo::new();
        repo.expect_health_check()
            .returning(|| Err(AppError::internal("connection refused")));

        let service = CountryService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        assert!(service.storage_health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_add_country_success() {
        let mut repo = MockCountryRepo::new();
        repo.expect_country_already_exists()
            .withf(|name| name == "Spain")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_add().times(1).returning(|new| {
            Ok(Country::new(1, new.country_name, new.country_abbreviation))
        });

        let service = CountryService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let country = service
            .add_country(NewCountry::new("Spain", "ESP"))
            .await
            .unwrap();

        assert_eq!(country, Country::new(1, "Spain", "ESP"));
    }

    #[tokio::test]
    async fn test_add_country_duplicate_name() {
        let mut repo = MockCountryRepo::new();
        repo.expect_country_already_exists()
            .returning(|_| Ok(Some(Country::new(1, "Spain", "ESP"))));
        repo.expect_add().never();

        let service = CountryService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let result = service.add_country(NewCountry::new("spain", "ES")).await;

        assert!(matches!(result.unwrap_err(), AppError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_get_country_not_found() {
        let mut repo = MockCountryRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let service = CountryService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let result = service.get_country(4).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_country_name_taken() {
        let mut repo = MockCountryRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Country::new(id, "Portugal", "PT"))));
        repo.expect_country_already_exists()
            .returning(|_| Ok(Some(Country::new(2, "Spain", "ESP"))));
        repo.expect_update().never();

        let service = CountryService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let result = service
            .update_country(1, NewCountry::new("Spain", "ES"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_remove_country_referenced_by_car() {
        let mut repo = MockCountryRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Country::new(id, "Japan", "JP"))));
        repo.expect_delete().never();

        let mut cars = MockCarRepo::new();
        cars.expect_find_by_country().returning(|id| {
            let now = Utc::now();
            Ok(vec![Car {
                id: 1,
                brand: Brand::new(1, "Corolla", "Toyota"),
                country: Country::new(id, "Japan", "JP"),
                registration: now,
                created_at: now,
                last_updated: now,
                soft_removed: true,
            }])
        });

        let service = CountryService::new(Arc::new(repo), car_service(cars));

        let result = service.remove_country(1).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_remove_country_unreferenced() {
        let mut repo = MockCountryRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Country::new(id, "Japan", "JP"))));
        repo.expect_delete()
            .times(1)
            .returning(|id| Ok(Country::new(id, "Japan", "JP")));

        let mut cars = MockCarRepo::new();
        cars.expect_find_by_country().returning(|_| Ok(vec![]));

        let service = CountryService::new(Arc::new(repo), car_service(cars));

        assert!(service.remove_country(1).await.is_ok());
    }
}
