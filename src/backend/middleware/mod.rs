//! Middleware Module
//!
//! HTTP middleware run before handlers.
//!
//! - **`auth`** - Bearer token authentication for every contact and chat route

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedMember};
