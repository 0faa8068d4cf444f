//! Repository trait for cars.

use async_trait::async_trait;

use super::Repository;
use crate::domain::entities::Car;
use crate::error::AppError;

/// Car-specific queries on top of [`Repository<Car>`].
///
/// None of these hide soft-removed cars.
#[async_trait]
pub trait CarRepository: Repository<Car> {
    /// Cars registered in the country with this name, compared case-insensitively.
    async fn find_by_country_name(&self, country_name: &str) -> Result<Vec<Car>, AppError>;

    async fn find_by_brand(&self, brand_id: i64) -> Result<Vec<Car>, AppError>;

    async fn find_by_country(&self, country_id: i64) -> Result<Vec<Car>, AppError>;

    /// Cars waiting for the sweep.
    async fn find_soft_removed(&self) -> Result<Vec<Car>, AppError>;
}

#[cfg(test)]
mockall::mock! {
    pub CarRepo {}

    #[async_trait]
    impl Repository<Car> for CarRepo {
        async fn get_all(&self) -> Result<Vec<Car>, AppError>;
        async fn get(&self, id: i64) -> Result<Option<Car>, AppError>;
        async fn add(&self, new: crate::domain::entities::NewCar) -> Result<Car, AppError>;
        async fn update(&self, entity: Car) -> Result<Car, AppError>;
        async fn delete(&self, id: i64) -> Result<Car, AppError>;
        async fn health_check(&self) -> Result<(), AppError>;
    }

    #[async_trait]
    impl CarRepository for CarRepo {
        async fn find_by_country_name(&self, country_name: &str) -> Result<Vec<Car>, AppError>;
        async fn find_by_brand(&self, brand_id: i64) -> Result<Vec<Car>, AppError>;
        async fn find_by_country(&self, country_id: i64) -> Result<Vec<Car>, AppError>;
        async fn find_soft_removed(&self) -> Result<Vec<Car>, AppError>;
    }
}
