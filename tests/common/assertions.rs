//! Response assertions
//!
//! Helpers for the JSON bodies every endpoint answers with.

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Assert a `200 {"success": true}` response
pub fn assert_success(response: &TestResponse) {
    assert_eq!(response.status_code(), StatusCode::OK, "body: {}", response.text());
    assert_eq!(response.json::<Value>()["success"], json!(true));
}

/// Assert an error response with the given status and `message`
pub fn assert_rejected(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    assert_eq!(response.json::<Value>()["message"], json!(message));
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
