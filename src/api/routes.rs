//! API route configuration.
//!
//! Authentication is attached by [`crate::routes::app_router`] according to the
//! configured auth mode.

use crate::api::handlers::{
    create_brand_handler, create_car_handler, create_country_handler, delete_brand_handler,
    delete_car_handler, delete_country_handler, enqueue_car_command_handler, get_brand_handler,
    get_car_handler, get_country_handler, list_brands_handler, list_cars_handler,
    list_countries_handler, update_brand_handler, update_car_handler, update_country_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All resource routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /cars`             - List active cars (`?country=` filter)
/// - `POST   /cars`             - Register a car
/// - `GET    /cars/{id}`        - Get an active car
/// - `PUT    /cars/{id}`        - Replace brand and country of a car
/// - `DELETE /cars/{id}`        - Soft-remove a car
/// - `POST   /cars/commands`    - Enqueue a car mutation (202 Accepted)
/// - `GET    /brands`           - List brands (`?company=` filter)
/// - `POST   /brands`           - Create a brand
/// - `GET    /brands/{id}`      - Get a brand
/// - `PUT    /brands/{id}`      - Update a brand
/// - `DELETE /brands/{id}`      - Delete an unreferenced brand
/// - `GET    /countries`        - List countries
/// - `POST   /countries`        - Create a country
/// - `GET    /countries/{id}`   - Get a country
/// - `PUT    /countries/{id}`   - Update a country
/// - `DELETE /countries/{id}`   - Delete an unreferenced country
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars_handler).post(create_car_handler))
        .route("/cars/commands", post(enqueue_car_command_handler))
        .route(
            "/cars/{id}",
            get(get_car_handler)
                .put(update_car_handler)
                .delete(delete_car_handler),
        )
        .route(
            "/brands",
            get(list_brands_handler).post(create_brand_handler),
        )
        .route(
            "/brands/{id}",
            get(get_brand_handler)
                .put(update_brand_handler)
                .delete(delete_brand_handler),
        )
        .route(
            "/countries",
            get(list_countries_handler).post(create_country_handler),
        )
        .route(
            "/countries/{id}",
            get(get_country_handler)
                .put(update_country_handler)
                .delete(delete_country_handler),
        )
}
