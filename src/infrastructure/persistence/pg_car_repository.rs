//! PostgreSQL implementation of the car repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Brand, Car, Country, NewCar};
use crate::domain::repositories::{CarRepository, Repository, record_not_found};
use crate::error::AppError;

/// Cars joined with their brand and country, without a trailing clause.
const SELECT_CARS: &str = r#"
    SELECT c.id, c.registration, c.created_at, c.last_updated, c.soft_removed,
           b.id AS brand_id, b.brand, b.company,
           n.id AS country_id, n.country_name, n.country_abbreviation
    FROM cars c
    JOIN brands b ON b.id = c.brand_id
    JOIN countries n ON n.id = c.country_id
"#;

#[derive(sqlx::FromRow)]
struct CarRow {
    id: i64,
    registration: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    soft_removed: bool,
    brand_id: i64,
    brand: String,
    company: String,
    country_id: i64,
    country_name: String,
    country_abbreviation: String,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: row.id,
            brand: Brand::new(row.brand_id, row.brand, row.company),
            country: Country::new(row.country_id, row.country_name, row.country_abbreviation),
            registration: row.registration,
            created_at: row.created_at,
            last_updated: row.last_updated,
            soft_removed: row.soft_removed,
        }
    }
}

/// PostgreSQL repository for cars.
///
/// Brand and country are loaded through joins. Foreign keys use `ON DELETE
/// RESTRICT`, so a brand or country cannot disappear under a stored car.
pub struct PgCarRepository {
    pool: Arc<PgPool>,
}

impl PgCarRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch(&self, filter: CarFilter<'_>) -> Result<Vec<Car>, AppError> {
        let sql = format!("{SELECT_CARS} {} ORDER BY c.id", filter.clause());
        let query = sqlx::query_as::<_, CarRow>(&sql);
        let query = match filter {
            CarFilter::CountryName(name) => query.bind(name),
            CarFilter::Brand(id) | CarFilter::Country(id) => query.bind(id),
            CarFilter::All | CarFilter::SoftRemoved => query,
        };

        let rows = query.fetch_all(self.pool.as_ref()).await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }
}

enum CarFilter<'a> {
    All,
    CountryName(&'a str),
    Brand(i64),
    Country(i64),
    SoftRemoved,
}

impl CarFilter<'_> {
    fn clause(&self) -> &'static str {
        match self {
            CarFilter::All => "",
            CarFilter::CountryName(_) => "WHERE LOWER(n.country_name) = LOWER($1)",
            CarFilter::Brand(_) => "WHERE c.brand_id = $1",
            CarFilter::Country(_) => "WHERE c.country_id = $1",
            CarFilter::SoftRemoved => "WHERE c.soft_removed",
        }
    }
}

#[async_trait]
impl Repository<Car> for PgCarRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Car>, AppError> {
        self.fetch(CarFilter::All).await
    }

    async fn get(&self, id: i64) -> Result<Option<Car>, AppError> {
        let sql = format!("{SELECT_CARS} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Car::from))
    }

    async fn add(&self, new: NewCar) -> Result<Car, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO cars (brand_id, country_id, registration, created_at, last_updated)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(new.brand.id)
        .bind(new.country.id)
        .bind(new.registration)
        .bind(new.created_at)
        .bind(new.last_updated)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Car {
            id,
            brand: new.brand,
            country: new.country,
            registration: new.registration,
            created_at: new.created_at,
            last_updated: new.last_updated,
            soft_removed: false,
        })
    }

    async fn update(&self, entity: Car) -> Result<Car, AppError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE cars SET
                brand_id     = $2,
                country_id   = $3,
                registration = $4,
                created_at   = $5,
                last_updated = $6,
                soft_removed = $7
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(entity.id)
        .bind(entity.brand.id)
        .bind(entity.country.id)
        .bind(entity.registration)
        .bind(entity.created_at)
        .bind(entity.last_updated)
        .bind(entity.soft_removed)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match updated {
            Some(_) => Ok(entity),
            None => Err(record_not_found::<Car>(entity.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<Car, AppError> {
        let row = sqlx::query_as::<_, CarRow>(
            r#"
            WITH c AS (
                DELETE FROM cars WHERE id = $1
                RETURNING id, brand_id, country_id, registration, created_at, last_updated, soft_removed
            )
            SELECT c.id, c.registration, c.created_at, c.last_updated, c.soft_removed,
                   b.id AS brand_id, b.brand, b.company,
                   n.id AS country_id, n.country_name, n.country_abbreviation
            FROM c
            JOIN brands b ON b.id = c.brand_id
            JOIN countries n ON n.id = c.country_id
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Car::from).ok_or_else(|| record_not_found::<Car>(id))
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn find_by_country_name(&self, country_name: &str) -> Result<Vec<Car>, AppError> {
        self.fetch(CarFilter::CountryName(country_name)).await
    }

    async fn find_by_brand(&self, brand_id: i64) -> Result<Vec<Car>, AppError> {
        self.fetch(CarFilter::Brand(brand_id)).await
    }

    async fn find_by_country(&self, country_id: i64) -> Result<Vec<Car>, AppError> {
        self.fetch(CarFilter::Country(country_id)).await
    }

    async fn find_soft_removed(&self) -> Result<Vec<Car>, AppError> {
        self.fetch(CarFilter::SoftRemoved).await
    }
}
