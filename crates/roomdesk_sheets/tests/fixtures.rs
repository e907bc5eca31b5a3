//! Test fixtures for the booking API tests
//!
//! Common configuration, request bodies and a router wired to the in-memory
//! sheet service.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use roomdesk_config::AppConfig;
use roomdesk_sheets::handlers::SheetsState;
use roomdesk_sheets::routes::router;
use roomdesk_sheets::service::mock::MockSheetService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SPREADSHEET_ID: &str = "test-spreadsheet";

/// Creates a mock AppConfig for testing
pub fn create_mock_config() -> Arc<AppConfig> {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 8080;
    config.sheets.spreadsheet_id = TEST_SPREADSHEET_ID.to_string();
    config.sheets.key_path = "test_key.json".to_string();
    Arc::new(config)
}

/// The booking router backed by `service`.
pub fn create_test_app(service: Arc<MockSheetService>) -> Router {
    let state = Arc::new(SheetsState::new(create_mock_config(), service));
    router(state)
}

/// The booking from the reference scenario: Ann, Deluxe, two nights.
pub fn sample_booking() -> Value {
    json!({
        "name": "Ann",
        "email": "a@x.com",
        "checkin": "2024-01-01",
        "checkout": "2024-01-03",
        "roomType": "Deluxe",
        "guests": 2,
        "price": 100
    })
}

pub fn sample_check() -> Value {
    json!({"roomType": "Deluxe", "checkin": "2024-01-01", "checkout": "2024-01-03"})
}

/// `sample_booking` with `field` removed.
pub fn booking_without(field: &str) -> Value {
    let mut body = sample_booking();
    body.as_object_mut().unwrap().remove(field);
    body
}

/// POSTs `body` as JSON and returns the status and decoded JSON response.
pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// POSTs with no body and no content type.
pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn is_reference(value: &Value) -> bool {
    value.as_str().is_some_and(|code| {
        code.len() == 10 && code.starts_with("REF-") && code[4..].chars().all(|c| c.is_ascii_digit())
    })
}
