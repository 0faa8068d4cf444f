mod common;

use axum::http::StatusCode;
use car_registry::application::workers::SoftRemovedSweep;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_car_success() {
    let (server, _state, _rx) = common::open_server();
    let brand_id = common::create_brand(&server, "Toyota", "Toyota Motor Corporation").await;
    let country_id = common::create_country(&server, "Spain", "ES").await;

    let response = server
        .post("/api/cars")
        .json(&json!({ "brand": { "id": brand_id }, "country": { "id": country_id } }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let id = json["id"].as_i64().unwrap();
    assert_eq!(
        response.header("location"),
        format!("{}/api/cars/{id}", common::BASE_URL).as_str()
    );
    assert_eq!(json["brand"]["brand"], "Toyota");
    assert_eq!(json["country"]["countryAbbreviation"], "ES");
    assert_eq!(json["softRemoved"], false);
    assert_eq!(json["registration"], json["createdAt"]);
    assert_eq!(json["createdAt"], json["lastUpdated"]);

    let rels: Vec<&str> = json["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, vec!["self", "brand", "country"]);
}

#[tokio::test]
async fn test_create_car_missing_reference() {
    let (server, _state, _rx) = common::open_server();
    let country_id = common::create_country(&server, "Spain", "ES").await;

    let response = server
        .post("/api/cars")
        .json(&json!({ "country": { "id": country_id } }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["errorCode"], 400);
    assert!(
        json["errorMessage"]
            .as_str()
            .unwrap()
            .starts_with("Request with non valid fields")
    );
}

#[tokio::test]
async fn test_create_car_reference_id_zero() {
    let (server, _state, _rx) = common::open_server();

    let response = server
        .post("/api/cars")
        .json(&json!({ "brand": { "id": 0 }, "country": { "id": 1 } }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_car_unknown_brand() {
    let (server, _state, _rx) = common::open_server();
    let country_id = common::create_country(&server, "Spain", "ES").await;

    let response = server
        .post("/api/cars")
        .json(&json!({ "brand": { "id": 99 }, "country": { "id": country_id } }))
        .await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>()["errorMessage"],
        "Brand with id 99 not found"
    );
}

#[tokio::test]
async fn test_create_car_invalid_json() {
    let (server, _state, _rx) = common::open_server();

    let response = server
        .post("/api/cars")
        .content_type("application/json")
        .text("{not json")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_get_car_invalid_id() {
    let (server, _state, _rx) = common::open_server();

    server.get("/api/cars/abc").await.assert_status_bad_request();
    server.get("/api/cars/0").await.assert_status_bad_request();
    server.get("/api/cars/12").await.assert_status_not_found();
}

#[tokio::test]
async fn test_list_cars_filters_by_country_name() {
    let (server, _state, _rx) = common::open_server();
    let brand_id = common::create_brand(&server, "Seat", "Volkswagen Group").await;
    let spain = common::create_country(&server, "Spain", "ES").await;
    let france = common::create_country(&server, "France", "FR").await;
    common::create_car(&server, brand_id, spain).await;
    common::create_car(&server, brand_id, spain).await;
    common::create_car(&server, brand_id, france).await;

    let all = server.get("/api/cars").await.json::<Vec<Value>>();
    assert_eq!(all.len(), 3);

    let spanish = server
        .get("/api/cars")
        .add_query_param("country", "sPaIn")
        .await
        .json::<Vec<Value>>();
    assert_eq!(spanish.len(), 2);
    assert!(
        spanish
            .iter()
            .all(|car| car["country"]["countryName"] == "Spain")
    );

    let none = server
        .get("/api/cars")
        .add_query_param("country", "Italy")
        .await
        .json::<Vec<Value>>();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_list_cars_country_filter_folds_non_ascii_case() {
    let (server, _state, _rx) = common::open_server();
    let brand_id = common::create_brand(&server, "Seat", "Volkswagen Group").await;
    let spain = common::create_country(&server, "España", "ES").await;
    common::create_car(&server, brand_id, spain).await;

    let cars = server
        .get("/api/cars")
        .add_query_param("country", "ESPAÑA")
        .await
        .json::<Vec<Value>>();

    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["country"]["countryName"], "España");
}

#[tokio::test]
async fn test_update_car_keeps_creation_timestamps() {
    let (server, _state, _rx) = common::open_server();
    let toyota = common::create_brand(&server, "Toyota", "Toyota Motor Corporation").await;
    let lexus = common::create_brand(&server, "Lexus", "Toyota Motor Corporation").await;
    let spain = common::create_country(&server, "Spain", "ES").await;
    let created = common::create_car(&server, toyota, spain).await;
    let id = created["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/cars/{id}"))
        .json(&json!({ "brand": { "id": lexus }, "country": { "id": spain } }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["brand"]["brand"], "Lexus");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["registration"], created["registration"]);

    let created_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["createdAt"].clone()).unwrap();
    let last_updated: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["lastUpdated"].clone()).unwrap();
    assert!(last_updated >= created_at);
}

#[tokio::test]
async fn test_update_car_not_found() {
    let (server, _state, _rx) = common::open_server();
    let brand_id = common::create_brand(&server, "Toyota", "Toyota Motor Corporation").await;
    let country_id = common::create_country(&server, "Spain", "ES").await;

    let response = server
        .put("/api/cars/42")
        .json(&json!({ "brand": { "id": brand_id }, "country": { "id": country_id } }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_soft_remove_then_sweep() {
    let (server, state, _rx) = common::open_server();
    let brand_id = common::create_brand(&server, "Toyota", "Toyota Motor Corporation").await;
    let country_id = common::create_country(&server, "Spain", "ES").await;
    let car = common::create_car(&server, brand_id, country_id).await;
    let id = car["id"].as_i64().unwrap();

    let response = server.delete(&format!("/api/cars/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["softRemoved"], true);

    server
        .get(&format!("/api/cars/{id}"))
        .await
        .assert_status_not_found();
    assert!(server.get("/api/cars").await.json::<Vec<Value>>().is_empty());

    // A soft-removed car still blocks removal of its brand
    server
        .delete(&format!("/api/brands/{brand_id}"))
        .await
        .assert_status_bad_request();

    let report = SoftRemovedSweep::new(state.car_service.clone())
        .sweep()
        .await
        .unwrap();
    assert_eq!(report.found, 1);
    assert_eq!(report.removed, 1);
    assert_eq!(report.failed, 0);

    server
        .delete(&format!("/api/brands/{brand_id}"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_soft_remove_twice_is_not_found() {
    let (server, _state, _rx) = common::open_server();
    let brand_id = common::create_brand(&server, "Toyota", "Toyota Motor Corporation").await;
    let country_id = common::create_country(&server, "Spain", "ES").await;
    let car = common::create_car(&server, brand_id, country_id).await;
    let id = car["id"].as_i64().unwrap();

    server
        .delete(&format!("/api/cars/{id}"))
        .await
        .assert_status_ok();
    server
        .delete(&format!("/api/cars/{id}"))
        .await
        .assert_status_not_found();
}
