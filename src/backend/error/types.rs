/**
 * Backend Error Types
 *
 * This module defines the error type returned by every workflow and HTTP
 * handler of the server.
 *
 * # Error Categories
 *
 * ## Rejections
 *
 * Workflow rejections (`ErrorKind`) come from validating input or from an
 * invariant of the relationship or membership state. They short-circuit the
 * workflow before any write and carry a fixed client message.
 *
 * ## Store Errors
 *
 * Failures of the underlying SQLite store abort the remaining pipeline and
 * surface directly to the caller, with the driver's detail passed through.
 *
 * ## Identity Errors
 *
 * A missing or unverifiable bearer token.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::server::config::ConfigError;
use crate::shared::ErrorKind;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use pocketchat::backend::error::BackendError;
/// use pocketchat::shared::ErrorKind;
///
/// let err: BackendError = ErrorKind::DuplicateRequest.into();
/// assert_eq!(err.message(), "Contact request already exists");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Workflow rejection (validation or state conflict)
    #[error(transparent)]
    Rejected(#[from] ErrorKind),

    /// Store failure
    ///
    /// The detail of the driver error is passed through to the client.
    #[error("SQL Error")]
    Store(#[from] sqlx::Error),

    /// Schema migration failure at startup
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Missing or invalid bearer token
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Invalid server configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BackendError {
    /// Create an unauthorized error with a client message
    pub fn unauthorized(message: &'static str) -> Self {
        Self::Unauthorized(message)
    }

    /// The rejection kind, if this is a workflow rejection
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Self::Rejected(kind) => Some(kind),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Rejected` - 400, or 404 for a missing chat or email
    /// - `Store` - 400, as the mobile clients expect
    /// - `Unauthorized` - 401
    /// - `Migration`, `Config` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected(kind) => {
                StatusCode::from_u16(kind.status()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            Self::Store(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Migration(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Underlying error detail passed through to the client, if any
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Store(err) => Some(err.to_string()),
            _ => None,
        }
    }
}
