//! Application layer: services and background workers.
//!
//! Services consume repository traits and own the entity lifecycle. Workers
//! call the same services from the command queue and the scheduler.
//!
//! # Available Services
//!
//! - [`services::car_service::CarService`] - Car lifecycle and reference validation
//! - [`services::brand_service::BrandService`] - Brand management
//! - [`services::country_service::CountryService`] - Country management
//! - [`services::auth_service::AuthService`] - JWT and basic authentication

pub mod services;
pub mod workers;
