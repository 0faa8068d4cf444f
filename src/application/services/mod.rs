//! Business logic services for the application layer.

pub mod auth_service;
pub mod brand_service;
pub mod car_service;
pub mod country_service;

pub use auth_service::{AuthService, Claims, Principal, Role};
pub use brand_service::BrandService;
pub use car_service::CarService;
pub use country_service::CountryService;
