//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod brands;
pub mod car_commands;
pub mod cars;
pub mod countries;
pub mod health;

pub use brands::{
    create_brand_handler, delete_brand_handler, get_brand_handler, list_brands_handler,
    update_brand_handler,
};
pub use car_commands::enqueue_car_command_handler;
pub use cars::{
    create_car_handler, delete_car_handler, get_car_handler, list_cars_handler,
    update_car_handler,
};
pub use countries::{
    create_country_handler, delete_country_handler, get_country_handler,
    list_countries_handler, update_country_handler,
};
pub use health::health_handler;
