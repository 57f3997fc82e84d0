/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses and converts
 * Axum extractor rejections into backend errors.
 *
 * # Response Format
 *
 * Error responses are JSON objects with a `message` field, plus an `error`
 * field carrying the underlying detail for store failures:
 * ```json
 * {
 *   "message": "SQL Error",
 *   "error": "error returned from database: UNIQUE constraint failed"
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;
use crate::shared::ErrorKind;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else if let Some(kind) = self.kind() {
            tracing::debug!(category = ?kind.category(), "Request rejected ({}): {}", status.as_u16(), kind);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = match self.detail() {
            Some(detail) => serde_json::json!({
                "message": self.message(),
                "error": detail,
            }),
            None => serde_json::json!({
                "message": self.message(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// An absent, unreadable or mistyped body is missing information
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Request body rejected");
        Self::Rejected(ErrorKind::MissingFields)
    }
}
