//! pocketchat - Main Library
//!
//! Backend of a mobile chat app: contact requests between members, confirmed
//! contacts, named group chats and push notifications to members' devices.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared with clients
//!   - Request/response bodies of every endpoint
//!   - Push notification payloads
//!   - Workflow rejection kinds (`ErrorKind`)
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and identity middleware
//!   - Contact request and chat membership workflows
//!   - SQLite persistence through sqlx
//!   - Notification queue and push dispatcher
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the
//!   `pocketchat-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use pocketchat::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::ErrorKind` for workflow rejections with fixed client messages
//! - `backend::error::BackendError` for everything a handler can return

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
