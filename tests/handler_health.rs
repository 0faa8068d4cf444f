mod common;

use axum::http::StatusCode;
use car_registry::config::AuthMode;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _rx) = common::create_test_state(10);
    let server = common::create_test_server(state, AuthMode::Jwt);

    // Public even when the API requires tokens
    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["car_queue"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_queue_closed() {
    let (state, rx) = common::create_test_state(10);
    drop(rx);
    let server = common::create_test_server(state, AuthMode::None);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["car_queue"]["status"], "error");
}
