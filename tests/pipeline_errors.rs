//! Terminal error interception: every unhandled failure surfaces as the
//! same opaque 500 body, regardless of its cause.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_malformed_json_body_maps_to_opaque_500() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .post("/api/products")
        .text("{ this is not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_malformed_order_payload_maps_to_opaque_500() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .post("/api/orders")
        .text("[[[")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_storage_failure_maps_to_opaque_500() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();
    store.fail_all();

    let response = server.get("/api/products").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_storage_failure_never_leaks_detail() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();
    store.fail_all();

    let response = server.get("/api/users/1").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let text = response.text();
    assert!(!text.contains("simulated storage failure"));
}

#[tokio::test]
async fn test_client_errors_are_not_flattened_to_500() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();
    store.seed_user("ada@example.com", "Ada");

    // A well-formed but invalid request keeps its client status.
    let response = server
        .post("/api/users")
        .json(&json!({ "email": "ada@example.com", "name": "Ada" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}
