//! Backend Error Module
//!
//! Error types of the backend server. Handlers return them and Axum turns
//! them into JSON responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse, etc.)
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `BackendError` - Every failure a handler can return: workflow
//!   rejections (`ErrorKind`), store failures, bad JSON, missing identity
//!   and startup problems
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return it directly.
//! The body is always `{"message": ...}`, with an `error` field carrying the
//! underlying detail for store and JSON failures.
//!
//! # Example
//!
//! ```rust,no_run
//! use pocketchat::backend::error::BackendError;
//! use pocketchat::shared::ErrorKind;
//!
//! fn check(found: bool) -> Result<(), BackendError> {
//!     if !found {
//!         return Err(ErrorKind::ChatNotFound.into());
//!     }
//!     Ok(())
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;

