//! PostgreSQL implementation of the brand repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Brand, NewBrand};
use crate::domain::repositories::{BrandRepository, Repository, record_not_found};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct BrandRow {
    id: i64,
    brand: String,
    company: String,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand::new(row.id, row.brand, row.company)
    }
}

/// PostgreSQL repository for brands.
///
/// Uniqueness of (brand, company) is backed by a case-insensitive unique index, so
/// a concurrent duplicate insert surfaces as [`AppError::AlreadyExists`].
pub struct PgBrandRepository {
    pool: Arc<PgPool>,
}

impl PgBrandRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Brand> for PgBrandRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Brand>, AppError> {
        let rows = sqlx::query_as::<_, BrandRow>(
            r#"
            SELECT id, brand, company
            FROM brands
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Brand>, AppError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r#"
            SELECT id, brand, company
            FROM brands
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Brand::from))
    }

    async fn add(&self, new: NewBrand) -> Result<Brand, AppError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r#"
            INSERT INTO brands (brand, company)
            VALUES ($1, $2)
            RETURNING id, brand, company
            "#,
        )
        .bind(&new.brand)
        .bind(&new.company)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, entity: Brand) -> Result<Brand, AppError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r#"
            UPDATE brands SET brand = $2, company = $3
            WHERE id = $1
            RETURNING id, brand, company
            "#,
        )
        .bind(entity.id)
        .bind(&entity.brand)
        .bind(&entity.company)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Brand::from)
            .ok_or_else(|| record_not_found::<Brand>(entity.id))
    }

    async fn delete(&self, id: i64) -> Result<Brand, AppError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r#"
            DELETE FROM brands
            WHERE id = $1
            RETURNING id, brand, company
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Brand::from)
            .ok_or_else(|| record_not_found::<Brand>(id))
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn find_by_company(&self, company: &str) -> Result<Vec<Brand>, AppError> {
        let rows = sqlx::query_as::<_, BrandRow>(
            r#"
            SELECT id, brand, company
            FROM brands
            WHERE LOWER(company) = LOWER($1)
            ORDER BY id
            "#,
        )
        .bind(company)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn brand_name_and_company_exists(
        &self,
        brand: &str,
        company: &str,
    ) -> Result<Option<Brand>, AppError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r#"
            SELECT id, brand, company
            FROM brands
            WHERE LOWER(brand) = LOWER($1) AND LOWER(company) = LOWER($2)
            "#,
        )
        .bind(brand)
        .bind(company)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Brand::from))
    }
}
