//! Repository trait for brands.

use async_trait::async_trait;

use super::Repository;
use crate::domain::entities::Brand;
use crate::error::AppError;

#[async_trait]
pub trait BrandRepository: Repository<Brand> {
    /// Brands owned by a company, compared case-insensitively.
    async fn find_by_company(&self, company: &str) -> Result<Vec<Brand>, AppError>;

    /// Finds the brand holding this (name, company) pair, ignoring case.
    ///
    /// Returns the match so callers can tell a conflict with another brand apart
    /// from the brand being updated.
    async fn brand_name_and_company_exists(
        &self,
        brand: &str,
        company: &str,
    ) -> Result<Option<Brand>, AppError>;
}

#[cfg(test)]
mockall::mock! {
    pub BrandRepo {}

    #[async_trait]
    impl Repository<Brand> for BrandRepo {
        async fn get_all(&self) -> Result<Vec<Brand>, AppError>;
        async fn get(&self, id: i64) -> Result<Option<Brand>, AppError>;
        async fn add(&self, new: crate::domain::entities::NewBrand) -> Result<Brand, AppError>;
        async fn update(&self, entity: Brand) -> Result<Brand, AppError>;
        async fn delete(&self, id: i64) -> Result<Brand, AppError>;
        async fn health_check(&self) -> Result<(), AppError>;
    }

    #[async_trait]
    impl BrandRepository for BrandRepo {
        async fn find_by_company(&self, company: &str) -> Result<Vec<Brand>, AppError>;
        async fn brand_name_and_company_exists(
            &self,
            brand: &str,
            company: &str,
        ) -> Result<Option<Brand>, AppError>;
    }
}
