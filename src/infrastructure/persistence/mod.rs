//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgCarRepository`] - Cars joined with their brand and country
//! - [`PgBrandRepository`] - Brand storage
//! - [`PgCountryRepository`] - Country storage
//! - [`InMemoryStore`] - All three traits over in-process tables

pub mod memory;
pub mod pg_brand_repository;
pub mod pg_car_repository;
pub mod pg_country_repository;

pub use memory::InMemoryStore;
pub use pg_brand_repository::PgBrandRepository;
pub use pg_car_repository::PgCarRepository;
pub use pg_country_repository::PgCountryRepository;
