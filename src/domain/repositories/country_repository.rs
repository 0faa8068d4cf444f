//! Repository trait for countries.

use async_trait::async_trait;

use super::Repository;
use crate::domain::entities::Country;
use crate::error::AppError;

#[async_trait]
pub trait CountryRepository: Repository<Country> {
    /// Finds the country with this name, ignoring case.
    async fn country_already_exists(
        &self,
        country_name: &str,
    ) -> Result<Option<Country>, AppError>;
}

#[cfg(test)]
mockall::mock! {
    pub CountryRepo {}

    #[async_trait]
    impl Repository<Country> for CountryRepo {
        async fn get_all(&self) -> Result<Vec<Country>, AppError>;
        async fn get(&self, id: i64) -> Result<Option<Country>, AppError>;
        async fn add(&self, new: crate::domain::entities::NewCountry) -> Result<Country, AppError>;
        async fn update(&self, entity: Country) -> Result<Country, AppError>;
        async fn delete(&self, id: i64) -> Result<Country, AppError>;
        async fn health_check(&self) -> Result<(), AppError>;
    }

    #[async_trait]
    impl CountryRepository for CountryRepo {
        async fn country_already_exists(
            &self,
            country_name: &str,
        ) -> Result<Option<Country>, AppError>;
    }
}
