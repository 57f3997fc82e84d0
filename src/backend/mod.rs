//! Backend Module
//!
//! All server-side code: an Axum HTTP server in front of the contact and
//! chat workflows, backed by SQLite.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, database, application state, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`middleware`** - Caller identity from bearer tokens
//! - **`auth`** - JWT claims and the member store
//! - **`messaging`** - Contact requests and contacts
//! - **`chat`** - Chats, membership and typing indicators
//! - **`notifications`** - Notification queue, dispatcher and push gateways
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Request Flow
//!
//! 1. `auth_middleware` verifies the token and attaches the caller
//! 2. The handler parses the body into a workflow input
//! 3. The workflow validates and writes inside one transaction
//! 4. After commit, affected members are queued on the `Notifier`
//! 5. The dispatcher delivers pushes in the background
//!
//! # State Management
//!
//! `AppState` holds the SQLite pool, the `Notifier` and the configuration.
//! No relationship or membership state is cached between requests.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Identity middleware
pub mod middleware;

/// Tokens and member records
pub mod auth;

/// Contact requests and contacts
pub mod messaging;

/// Group chats
pub mod chat;

/// Push notifications
pub mod notifications;

/// Backend error types
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::BackendError;
pub use server::create_app;
