//! Brand management service.

use std::sync::Arc;

use crate::application::services::CarService;
use crate::domain::entities::{Brand, NewBrand};
use crate::domain::repositories::{BrandRepository, record_not_found};
use crate::error::AppError;

/// Service for managing vehicle brands.
///
/// Enforces:
/// - (brand, company) pairs are unique, ignoring case
/// - a brand still referenced by any stored car cannot be removed
pub struct BrandService {
    repository: Arc<dyn BrandRepository>,
    cars: Arc<CarService>,
}

impl BrandService {
    pub fn new(repository: Arc<dyn BrandRepository>, cars: Arc<CarService>) -> Self {
        Self { repository, cars }
    }

    pub async fn get_all_brands(&self) -> Result<Vec<Brand>, AppError> {
        self.repository.get_all().await
    }

    /// Lists the brands of a company, matching case-insensitively.
    pub async fn get_all_brands_from_company(
        &self,
        company: &str,
    ) -> Result<Vec<Brand>, AppError> {
        self.repository.find_by_company(company.trim()).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brand does not exist.
    pub async fn get_brand(&self, id: i64) -> Result<Brand, AppError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| brand_not_found(id))
    }

    /// Creates a brand.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the (brand, company) pair is taken.
    pub async fn add_brand(&self, new_brand: NewBrand) -> Result<Brand, AppError> {
        if self
            .repository
            .brand_name_and_company_exists(&new_brand.brand, &new_brand.company)
            .await?
            .is_some()
        {
            return Err(brand_already_exists(&new_brand));
        }

        let brand = self.repository.add(new_brand).await?;

        tracing::info!(
            brand_id = brand.id,
            brand = %brand.brand,
            company = %brand.company,
            "Brand added"
        );

        Ok(brand)
    }

    /// Replaces the name and company of a brand.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brand does not exist.
    /// Returns [`AppError::AlreadyExists`] if another brand holds the new pair.
    pub async fn update_brand(&self, id: i64, update: NewBrand) -> Result<Brand, AppError> {
        self.get_brand(id).await?;

        if let Some(existing) = self
            .repository
            .brand_name_and_company_exists(&update.brand, &update.company)
            .await?
            && existing.id != id
        {
            return Err(brand_already_exists(&update));
        }

        let brand = self
            .repository
            .update(Brand {
                id,
                brand: update.brand,
                company: update.company,
            })
            .await?;

        tracing::info!(brand_id = brand.id, "Brand updated");

        Ok(brand)
    }

    /// Deletes a brand that no stored car references.
    ///
    /// Soft-removed cars still count as references until the sweep deletes them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brand does not exist.
    /// Returns [`AppError::BadRequest`] if any car references the brand.
    pub async fn remove_brand(&self, id: i64) -> Result<Brand, AppError> {
        self.get_brand(id).await?;

        let cars = self.cars.get_all_cars_from_brand(id).await?;
        if !cars.is_empty() {
            return Err(AppError::bad_request(format!(
                "Brand with id {id} cannot be removed because {} car(s) reference it",
                cars.len()
            )));
        }

        let brand = self.repository.delete(id).await?;

        tracing::info!(brand_id = brand.id, "Brand removed");

        Ok(brand)
    }
}

fn brand_not_found(id: i64) -> AppError {
    record_not_found::<Brand>(id)
}

fn brand_already_exists(brand: &NewBrand) -> AppError {
    AppError::already_exists(format!(
        "Brand {} of company {} already exists",
        brand.brand, brand.company
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SystemClock;
    use crate::domain::entities::{Car, Country};
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

    fn test_car(brand: Brand) -> Car {
        let now = Utc::now();
        Car {
            id: 10,
            brand,
            country: Country::new(1, "Japan", "JP"),
            registration: now,
            created_at: now,
            last_updated: now,
            soft_removed: false,
        }
    }

    #[tokio::test]
    async fn test_add_brand_success() {
        let mut repo = MockBrandRepo::new();
        repo.expect_brand_name_and_company_exists()
            .withf(|brand, company| brand == "Corolla" && company == "Toyota")
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_add()
            .times(1)
            .returning(|new| Ok(Brand::new(1, new.brand, new.company)));

        let service = BrandService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let brand = service
            .add_brand(NewBrand::new("Corolla", "Toyota"))
            .await
            .unwrap();

        assert_eq!(brand.id, 1);
        assert_eq!(brand.brand, "Corolla");
    }

    #[tokio::test]
    async fn test_add_brand_duplicate_pair() {
        let mut repo = MockBrandRepo::new();
        repo.expect_brand_name_and_company_exists()
            .times(1)
            .returning(|_, _| Ok(Some(Brand::new(1, "Corolla", "Toyota"))));
        repo.expect_add().never();

        let service = BrandService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let result = service.add_brand(NewBrand::new("corolla", "TOYOTA")).await;

        assert!(matches!(result.unwrap_err(), AppError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_update_brand_not_found() {
        let mut repo = MockBrandRepo::new();
        repo.expect_get().times(1).returning(|_| Ok(None));
        repo.expect_update().never();

        let service = BrandService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let result = service.update_brand(7, NewBrand::new("A", "B")).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_brand_conflicts_with_other_brand() {
        let mut repo = MockBrandRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Brand::new(id, "Yaris", "Toyota"))));
        repo.expect_brand_name_and_company_exists()
            .returning(|_, _| Ok(Some(Brand::new(2, "Corolla", "Toyota"))));
        repo.expect_update().never();

        let service = BrandService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let result = service
            .update_brand(1, NewBrand::new("Corolla", "Toyota"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_update_brand_keeping_own_pair() {
        let mut repo = MockBrandRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Brand::new(id, "Yaris", "Toyota"))));
        repo.expect_brand_name_and_company_exists()
            .returning(|_, _| Ok(Some(Brand::new(1, "Yaris", "Toyota"))));
        repo.expect_update().times(1).returning(Ok);

        let service = BrandService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let brand = service
            .update_brand(1, NewBrand::new("YARIS", "Toyota"))
            .await
            .unwrap();

        assert_eq!(brand.brand, "YARIS");
    }

    #[tokio::test]
    async fn test_remove_brand_with_cars() {
        let mut repo = MockBrandRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Brand::new(id, "Corolla", "Toyota"))));
        repo.expect_delete().never();

        let mut cars = MockCarRepo::new();
        cars.expect_find_by_brand()
            .withf(|id| *id == 1)
            .returning(|id| Ok(vec![test_car(Brand::new(id, "Corolla", "Toyota"))]));

        let service = BrandService::new(Arc::new(repo), car_service(cars));

        let result = service.remove_brand(1).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_remove_brand_without_cars() {
        let mut repo = MockBrandRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Brand::new(id, "Corolla", "Toyota"))));
        repo.expect_delete()
            .times(1)
            .returning(|id| Ok(Brand::new(id, "Corolla", "Toyota")));

        let mut cars = MockCarRepo::new();
        cars.expect_find_by_brand().returning(|_| Ok(vec![]));

        let service = BrandService::new(Arc::new(repo), car_service(cars));

        let removed = service.remove_brand(1).await.unwrap();

        assert_eq!(removed.id, 1);
    }

    #[tokio::test]
    async fn test_get_all_brands_from_company_trims() {
        let mut repo = MockBrandRepo::new();
        repo.expect_find_by_company()
            .withf(|company| company == "Toyota")
            .times(1)
            .returning(|_| Ok(vec![Brand::new(1, "Corolla", "Toyota")]));

        let service = BrandService::new(Arc::new(repo), car_service(MockCarRepo::new()));

        let brands = service.get_all_brands_from_company(" Toyota ").await.unwrap();

        assert_eq!(brands.len(), 1);
    }
}
