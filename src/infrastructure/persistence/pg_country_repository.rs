//! PostgreSQL implementation of the country repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Country, NewCountry};
use crate::domain::repositories::{CountryRepository, Repository, record_not_found};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CountryRow {
    id: i64,
    country_name: String,
    country_abbreviation: String,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Country::new(row.id, row.country_name, row.country_abbreviation)
    }
}

/// PostgreSQL repository for countries.
pub struct PgCountryRepository {
    pool: Arc<PgPool>,
}

impl PgCountryRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Country> for PgCountryRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Country>, AppError> {
        let rows = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, country_name, country_abbreviation
            FROM countries
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Country::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, country_name, country_abbreviation
            FROM countries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Country::from))
    }

    async fn add(&self, new: NewCountry) -> Result<Country, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            INSERT INTO countries (country_name, country_abbreviation)
            VALUES ($1, $2)
            RETURNING id, country_name, country_abbreviation
            "#,
        )
        .bind(&new.country_name)
        .bind(&new.country_abbreviation)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, entity: Country) -> Result<Country, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            UPDATE countries SET country_name = $2, country_abbreviation = $3
            WHERE id = $1
            RETURNING id, country_name, country_abbreviation
            "#,
        )
        .bind(entity.id)
        .bind(&entity.country_name)
        .bind(&entity.country_abbreviation)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Country::from)
            .ok_or_else(|| record_not_found::<Country>(entity.id))
    }

    async fn delete(&self, id: i64) -> Result<Country, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            DELETE FROM countries
            WHERE id = $1
            RETURNING id, country_name, country_abbreviation
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Country::from)
            .ok_or_else(|| record_not_found::<Country>(id))
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn country_already_exists(
        &self,
        country_name: &str,
    ) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, country_name, country_abbreviation
            FROM countries
            WHERE LOWER(country_name) = LOWER($1)
            "#,
        )
        .bind(country_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Country::from))
    }
}
