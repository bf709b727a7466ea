//! Router-level tests.
//!
//! These tests exercise the HTTP boundary - routing, extraction,
//! validation, and the error body shape - through an in-process test
//! server. The pool behind the state is created lazily and no test
//! here reaches the execute stage, so no database is required.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;

use crate::{AppState, Config, build_router};

fn test_server() -> TestServer {
    let config = Config::default();
    let db = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool from default url");
    let router = build_router(AppState { db, config }).expect("build router");
    TestServer::new(router).expect("test server")
}

#[tokio::test]
async fn healthz_responds_ok() {
    let server = test_server();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn unknown_route_is_not_found_with_detail() {
    let server = test_server();
    let response = server.get("/no/such/route").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["detail"], "not found");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = test_server();
    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/resources"].is_object());
    assert!(body["paths"]["/resource_types/{id}"].is_object());
}

#[tokio::test]
async fn non_numeric_path_id_is_not_found() {
    let server = test_server();
    for path in ["/resource_types/abc", "/resources/abc"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["detail"], "abc not found");
    }
}

#[tokio::test]
async fn create_without_body_is_bad_request() {
    let server = test_server();
    let response = server.post("/resource_types").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "request body contains no data");
}

#[tokio::test]
async fn create_resource_type_requires_name() {
    let server = test_server();
    let response = server.post("/resource_types").json(&json!({ "max_speed": 100 })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "you have to specify name");
}

#[tokio::test]
async fn create_resource_type_requires_max_speed() {
    let server = test_server();
    let response = server.post("/resource_types").json(&json!({ "name": "crane" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "you have to specify max_speed");
}

#[tokio::test]
async fn create_resource_type_rejects_zero_max_speed() {
    // An explicit 0 is "present", then fails its range rule
    let server = test_server();
    let response = server
        .post("/resource_types")
        .json(&json!({ "name": "crane", "max_speed": 0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "max_speed can't be less than one");
}

#[tokio::test]
async fn create_resource_type_rejects_non_numeric_max_speed() {
    let server = test_server();
    let response = server
        .post("/resource_types")
        .json(&json!({ "name": "crane", "max_speed": "fast" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_resource_requires_all_fields() {
    let server = test_server();

    let response = server.post("/resources").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "you have to specify name");

    let response = server.post("/resources").json(&json!({ "name": "truck-1" })).await;
    let body: Value = response.json();
    assert_eq!(body["detail"], "you have to specify resource_type_id");

    let response = server
        .post("/resources")
        .json(&json!({ "name": "truck-1", "resource_type_id": 1 }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["detail"], "you have to specify current_speed");
}

#[tokio::test]
async fn create_resource_rejects_negative_speed() {
    let server = test_server();
    let response = server
        .post("/resources")
        .json(&json!({ "name": "truck-1", "resource_type_id": 1, "current_speed": -5 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "current_speed can't be negative");
}

#[tokio::test]
async fn update_with_empty_body_is_bad_request() {
    let server = test_server();
    for path in ["/resource_types/1", "/resources/1"] {
        let response = server.patch(path).json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["detail"], "at least one attribute to change have to be specified");
    }
}

#[tokio::test]
async fn update_with_non_numeric_id_is_not_found() {
    let server = test_server();
    let response = server.patch("/resource_types/first").json(&json!({ "max_speed": 10 })).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["detail"], "first not found");
}

#[tokio::test]
async fn update_rejects_out_of_range_values() {
    let server = test_server();

    let response = server.patch("/resource_types/1").json(&json!({ "max_speed": 0 })).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.patch("/resources/1").json(&json!({ "current_speed": -1 })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_without_id_parameter_is_bad_request() {
    let server = test_server();
    for path in ["/resource_types", "/resources"] {
        let response = server.delete(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["detail"], "wrong id parameters");
    }
}

#[tokio::test]
async fn delete_with_malformed_id_list_is_bad_request() {
    let server = test_server();
    let response = server.delete("/resources").add_query_param("id", "1,a").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "wrong id parameters");
}

#[tokio::test]
async fn list_resources_with_malformed_type_filter_is_bad_request() {
    let server = test_server();
    for raw in ["1,a", "abc", ""] {
        let response = server.get("/resources").add_query_param("type", raw).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["detail"], "wrong type url parameters");
    }
}
