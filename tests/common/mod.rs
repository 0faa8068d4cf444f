#![allow(dead_code)]

use axum_test::TestServer;
use car_registry::api::links::LinkBuilder;
use car_registry::application::services::{AuthService, Role};
use car_registry::config::AuthMode;
use car_registry::domain::car_command::CarCommand;
use car_registry::domain::clock::SystemClock;
use car_registry::infrastructure::messaging::ChannelCarCommandSender;
use car_registry::infrastructure::persistence::InMemoryStore;
use car_registry::routes::{RouterOptions, build_router};
use car_registry::state::{AppState, Repositories};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::mpsc;
use url::Url;

/// 32 bytes once decoded.
pub const JWT_SECRET: &str = "Y2FyLXJlZ2lzdHJ5LXRlc3Qtc2VjcmV0LTMyYnl0ZXM=";
pub const JWT_ISSUER: &str = "car-registry";
pub const BASE_URL: &str = "http://cars.test";
pub const BASIC_USER: &str = "admin";
pub const BASIC_PASSWORD: &str = "s3cret";

pub fn create_test_state(
    queue_capacity: usize,
) -> (AppState, mpsc::Receiver<CarCommand>) {
    let store = Arc::new(InMemoryStore::new());
    let (tx, rx) = mpsc::channel(queue_capacity);

    let auth_service = AuthService::disabled()
        .with_jwt(JWT_SECRET, JWT_ISSUER)
        .unwrap()
        .with_basic(BASIC_USER, BASIC_PASSWORD);

    let state = AppState::new(
        Repositories {
            cars: store.clone(),
            brands: store.clone(),
            countries: store,
        },
        Arc::new(SystemClock),
        Arc::new(ChannelCarCommandSender::new(tx)),
        Arc::new(auth_service),
        LinkBuilder::new(&Url::parse(BASE_URL).unwrap()),
    );

    (state, rx)
}

pub fn create_test_server(state: AppState, auth_mode: AuthMode) -> TestServer {
    let app = build_router(
        state,
        RouterOptions {
            auth_mode,
            rate_limit_enabled: false,
        },
    );
    TestServer::new(app).unwrap()
}

/// Server without authentication, for tests about resource behavior.
pub fn open_server() -> (TestServer, AppState, mpsc::Receiver<CarCommand>) {
    let (state, rx) = create_test_state(100);
    let server = create_test_server(state.clone(), AuthMode::None);
    (server, state, rx)
}

pub fn token(state: &AppState, role: Role) -> String {
    state
        .auth_service
        .issue_token("tester", role, chrono::Duration::hours(1))
        .unwrap()
}

pub async fn create_brand(server: &TestServer, brand: &str, company: &str) -> i64 {
    let response = server
        .post("/api/brands")
        .json(&json!({ "brand": brand, "company": company }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_country(server: &TestServer, name: &str, abbreviation: &str) -> i64 {
    let response = server
        .post("/api/countries")
        .json(&json!({ "countryName": name, "countryAbbreviation": abbreviation }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_car(server: &TestServer, brand_id: i64, country_id: i64) -> Value {
    let response = server
        .post("/api/cars")
        .json(&json!({ "brand": { "id": brand_id }, "country": { "id": country_id } }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
