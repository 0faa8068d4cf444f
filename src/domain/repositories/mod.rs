//! Repository trait definitions for the domain layer.
//!
//! [`Repository`] is the generic persistence facade shared by every entity. The
//! entity-specific traits extend it with filtered queries.
//!
//! # Implementations
//!
//! - `crate::infrastructure::persistence::Pg*Repository` - PostgreSQL
//! - `crate::infrastructure::persistence::memory` - In-memory store for development and tests
//!
//! Mocks are generated with `mockall` under `cfg(test)`.

pub mod brand_repository;
pub mod car_repository;
pub mod country_repository;
pub mod repository;

pub use brand_repository::BrandRepository;
pub use car_repository::CarRepository;
pub use country_repository::CountryRepository;
pub use repository::{Repository, record_not_found};

#[cfg(test)]
pub use brand_repository::MockBrandRepo;
#[cfg(test)]
pub use car_repository::MockCarRepo;
#[cfg(test)]
pub use country_repository::MockCountryRepo;
