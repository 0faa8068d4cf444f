//! In-memory storage for development and tests.
//!
//! One [`InMemoryStore`] implements every repository trait. All tables live behind
//! a single `tokio::sync::RwLock`, so writes are serialised the way row locks
//! would serialise them in PostgreSQL. The store enforces the same constraints as
//! the migrations: case-insensitive unique names and restrictive foreign keys.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::{
    Brand, Car, Country, NewBrand, NewCar, NewCountry, names_match,
};
use crate::domain::repositories::{
    BrandRepository, CarRepository, CountryRepository, Repository, record_not_found,
};
use crate::error::AppError;

/// A car row: references are stored as ids and resolved on read.
#[derive(Debug, Clone)]
struct CarRecord {
    brand_id: i64,
    country_id: i64,
    registration: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    soft_removed: bool,
}

#[derive(Debug, Default)]
struct Tables {
    brands: BTreeMap<i64, Brand>,
    countries: BTreeMap<i64, Country>,
    cars: BTreeMap<i64, CarRecord>,
    brand_seq: i64,
    country_seq: i64,
    car_seq: i64,
}

impl Tables {
    fn resolve(&self, id: i64, record: &CarRecord) -> Result<Car, AppError> {
        let brand = self.brands.get(&record.brand_id).cloned().ok_or_else(|| {
            AppError::internal(format!(
                "Car {id} references missing brand {}",
                record.brand_id
            ))
        })?;
        let country = self.countries.get(&record.country_id).cloned().ok_or_else(|| {
            AppError::internal(format!(
                "Car {id} references missing country {}",
                record.country_id
            ))
        })?;

        Ok(Car {
            id,
            brand,
            country,
            registration: record.registration,
            created_at: record.created_at,
            last_updated: record.last_updated,
            soft_removed: record.soft_removed,
        })
    }

    fn cars_where(&self, predicate: impl Fn(&CarRecord) -> bool) -> Result<Vec<Car>, AppError> {
        self.cars
            .iter()
            .filter(|(_, record)| predicate(record))
            .map(|(id, record)| self.resolve(*id, record))
            .collect()
    }

    fn check_car_references(&self, brand_id: i64, country_id: i64) -> Result<(), AppError> {
        if !self.brands.contains_key(&brand_id) {
            return Err(AppError::bad_request(format!(
                "Brand with id {brand_id} does not exist"
            )));
        }
        if !self.countries.contains_key(&country_id) {
            return Err(AppError::bad_request(format!(
                "Country with id {country_id} does not exist"
            )));
        }
        Ok(())
    }

    fn brand_pair_taken(&self, brand: &str, company: &str, except: Option<i64>) -> bool {
        self.brands
            .values()
            .any(|b| Some(b.id) != except && b.is_named(brand, company))
    }

    fn country_name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.countries
            .values()
            .any(|c| Some(c.id) != except && names_match(&c.country_name, name))
    }
}

/// Thread-safe in-memory store backing all three repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Brand> for InMemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Brand>, AppError> {
        Ok(self.tables.read().await.brands.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Brand>, AppError> {
        Ok(self.tables.read().await.brands.get(&id).cloned())
    }

    async fn add(&self, new: NewBrand) -> Result<Brand, AppError> {
        let mut tables = self.tables.write().await;
        if tables.brand_pair_taken(&new.brand, &new.company, None) {
            return Err(AppError::already_exists(
                "Unique constraint violation (brands_brand_company_key)",
            ));
        }

        tables.brand_seq += 1;
        let brand = Brand::new(tables.brand_seq, new.brand, new.company);
        tables.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn update(&self, entity: Brand) -> Result<Brand, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.brands.contains_key(&entity.id) {
            return Err(record_not_found::<Brand>(entity.id));
        }
        if tables.brand_pair_taken(&entity.brand, &entity.company, Some(entity.id)) {
            return Err(AppError::already_exists(
                "Unique constraint violation (brands_brand_company_key)",
            ));
        }

        tables.brands.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<Brand, AppError> {
        let mut tables = self.tables.write().await;
        if tables.cars.values().any(|car| car.brand_id == id) {
            return Err(AppError::bad_request(
                "The record is still referenced by other records (cars_brand_id_fkey)",
            ));
        }

        tables
            .brands
            .remove(&id)
            .ok_or_else(|| record_not_found::<Brand>(id))
    }
}

#[async_trait]
impl BrandRepository for InMemoryStore {
    async fn find_by_company(&self, company: &str) -> Result<Vec<Brand>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .brands
            .values()
            .filter(|b| names_match(&b.company, company))
            .cloned()
            .collect())
    }

    async fn brand_name_and_company_exists(
        &self,
        brand: &str,
        company: &str,
    ) -> Result<Option<Brand>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .brands
            .values()
            .find(|b| b.is_named(brand, company))
            .cloned())
    }
}

#[async_trait]
impl Repository<Country> for InMemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Country>, AppError> {
        Ok(self.tables.read().await.countries.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Country>, AppError> {
        Ok(self.tables.read().await.countries.get(&id).cloned())
    }

    async fn add(&self, new: NewCountry) -> Result<Country, AppError> {
        let mut tables = self.tables.write().await;
        if tables.country_name_taken(&new.country_name, None) {
            return Err(AppError::already_exists(
                "Unique constraint violation (countries_country_name_key)",
            ));
        }

        tables.country_seq += 1;
        let country = Country::new(
            tables.country_seq,
            new.country_name,
            new.country_abbreviation,
        );
        tables.countries.insert(country.id, country.clone());
        Ok(country)
    }

    async fn update(&self, entity: Country) -> Result<Country, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.countries.contains_key(&entity.id) {
            return Err(record_not_found::<Country>(entity.id));
        }
        if tables.country_name_taken(&entity.country_name, Some(entity.id)) {
            return Err(AppError::already_exists(
                "Unique constraint violation (countries_country_name_key)",
            ));
        }

        tables.countries.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<Country, AppError> {
        let mut tables = self.tables.write().await;
        if tables.cars.values().any(|car| car.country_id == id) {
            return Err(AppError::bad_request(
                "The record is still referenced by other records (cars_country_id_fkey)",
            ));
        }

        tables
            .countries
            .remove(&id)
            .ok_or_else(|| record_not_found::<Country>(id))
    }
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn country_already_exists(
        &self,
        country_name: &str,
    ) -> Result<Option<Country>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .countries
            .values()
            .find(|c| names_match(&c.country_name, country_name))
            .cloned())
    }
}

#[async_trait]
impl Repository<Car> for InMemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Car>, AppError> {
        self.tables.read().await.cars_where(|_| true)
    }

    async fn get(&self, id: i64) -> Result<Option<Car>, AppError> {
        let tables = self.tables.read().await;
        tables
            .cars
            .get(&id)
            .map(|record| tables.resolve(id, record))
            .transpose()
    }

    async fn add(&self, new: NewCar) -> Result<Car, AppError> {
        let mut tables = self.tables.write().await;
        tables.check_car_references(new.brand.id, new.country.id)?;

        tables.car_seq += 1;
        let id = tables.car_seq;
        let record = CarRecord {
            brand_id: new.brand.id,
            country_id: new.country.id,
            registration: new.registration,
            created_at: new.created_at,
            last_updated: new.last_updated,
            soft_removed: false,
        };
        let car = tables.resolve(id, &record)?;
        tables.cars.insert(id, record);
        Ok(car)
    }

    async fn update(&self, entity: Car) -> Result<Car, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.cars.contains_key(&entity.id) {
            return Err(record_not_found::<Car>(entity.id));
        }
        tables.check_car_references(entity.brand.id, entity.country.id)?;

        let record = CarRecord {
            brand_id: entity.brand.id,
            country_id: entity.country.id,
            registration: entity.registration,
            created_at: entity.created_at,
            last_updated: entity.last_updated,
            soft_removed: entity.soft_removed,
        };
        let car = tables.resolve(entity.id, &record)?;
        tables.cars.insert(entity.id, record);
        Ok(car)
    }

    async fn delete(&self, id: i64) -> Result<Car, AppError> {
        let mut tables = self.tables.write().await;
        let record = tables
            .cars
            .remove(&id)
            .ok_or_else(|| record_not_found::<Car>(id))?;
        tables.resolve(id, &record)
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn find_by_country_name(&self, country_name: &str) -> Result<Vec<Car>, AppError> {
        let tables = self.tables.read().await;
        let country_ids: Vec<i64> = tables
            .countries
            .values()
            .filter(|c| names_match(&c.country_name, country_name))
            .map(|c| c.id)
            .collect();

        tables.cars_where(|car| country_ids.contains(&car.country_id))
    }

    async fn find_by_brand(&self, brand_id: i64) -> Result<Vec<Car>, AppError> {
        self.tables
            .read()
            .await
            .cars_where(|car| car.brand_id == brand_id)
    }

    async fn find_by_country(&self, country_id: i64) -> Result<Vec<Car>, AppError> {
        self.tables
            .read()
            .await
            .cars_where(|car| car.country_id == country_id)
    }

    async fn find_soft_removed(&self) -> Result<Vec<Car>, AppError> {
        self.tables.read().await.cars_where(|car| car.soft_removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (InMemoryStore, Brand, Country) {
        let store = InMemoryStore::new();
        let brand = Repository::<Brand>::add(&store, NewBrand::new("Corolla", "Toyota"))
            .await
            .unwrap();
        let country = Repository::<Country>::add(&store, NewCountry::new("Japan", "JP"))
            .await
            .unwrap();
        (store, brand, country)
    }

    fn new_car(brand: &Brand, country: &Country) -> NewCar {
        let now = Utc::now();
        NewCar {
            brand: brand.clone(),
            country: country.clone(),
            registration: now,
            created_at: now,
            last_updated: now,
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = InMemoryStore::new();
        let first = Repository::<Brand>::add(&store, NewBrand::new("A", "X"))
            .await
            .unwrap();
        Repository::<Brand>::delete(&store, first.id).await.unwrap();
        let second = Repository::<Brand>::add(&store, NewBrand::new("B", "X"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_brand_pair_unique_ignoring_case() {
        let (store, _, _) = seeded().await;

        let result = Repository::<Brand>::add(&store, NewBrand::new("COROLLA", "toyota")).await;

        assert!(matches!(result.unwrap_err(), AppError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_referenced_brand_cannot_be_deleted() {
        let (store, brand, country) = seeded().await;
        Repository::<Car>::add(&store, new_car(&brand, &country))
            .await
            .unwrap();

        let result = Repository::<Brand>::delete(&store, brand.id).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_car_reads_reflect_brand_updates() {
        let (store, brand, country) = seeded().await;
        let car = Repository::<Car>::add(&store, new_car(&brand, &country))
            .await
            .unwrap();

        Repository::<Brand>::update(&store, Brand::new(brand.id, "Yaris", "Toyota"))
            .await
            .unwrap();

        let reloaded = Repository::<Car>::get(&store, car.id).await.unwrap().unwrap();
        assert_eq!(reloaded.brand.brand, "Yaris");
    }

    #[tokio::test]
    async fn test_find_by_country_name_ignores_case() {
        let (store, brand, country) = seeded().await;
        Repository::<Car>::add(&store, new_car(&brand, &country))
            .await
            .unwrap();

        let cars = store.find_by_country_name("jApAn").await.unwrap();

        assert_eq!(cars.len(), 1);
    }

    #[tokio::test]
    async fn test_name_matching_folds_non_ascii_case() {
        let (store, brand, _) = seeded().await;
        let spain = Repository::<Country>::add(&store, NewCountry::new("España", "ES"))
            .await
            .unwrap();
        Repository::<Car>::add(&store, new_car(&brand, &spain))
            .await
            .unwrap();
        Repository::<Brand>::add(&store, NewBrand::new("Ibiza", "Škoda"))
            .await
            .unwrap();

        assert_eq!(store.find_by_country_name("ESPAÑA").await.unwrap().len(), 1);
        assert_eq!(store.find_by_company("ŠKODA").await.unwrap().len(), 1);

        let duplicate = Repository::<Country>::add(&store, NewCountry::new("ESPAÑA", "EX")).await;
        assert!(matches!(
            duplicate.unwrap_err(),
            AppError::AlreadyExists { .. }
        ));
    }

    #[tokio::test]
    async fn test_find_soft_removed() {
        let (store, brand, country) = seeded().await;
        let mut car = Repository::<Car>::add(&store, new_car(&brand, &country))
            .await
            .unwrap();
        Repository::<Car>::add(&store, new_car(&brand, &country))
            .await
            .unwrap();

        car.soft_removed = true;
        Repository::<Car>::update(&store, car.clone()).await.unwrap();

        let pending = store.find_soft_removed().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, car.id);
    }

    #[tokio::test]
    async fn test_car_with_unknown_country_rejected() {
        let (store, brand, _) = seeded().await;
        let ghost = Country::new(99, "Atlantis", "ATL");

        let result = Repository::<Car>::add(&store, new_car(&brand, &ghost)).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }
}
