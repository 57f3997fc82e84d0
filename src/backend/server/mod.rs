//! Server Module
//!
//! Everything needed to turn configuration into a running application.
//!
//! - **`config`** - `ServerConfig` loading (`.env`, TOML file, environment)
//! - **`database`** - SQLite pool and migrations
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`init`** - Server initialization and app creation

/// Server configuration loading
pub mod config;

/// Database connection and migrations
pub mod database;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::create_app;
pub use state::AppState;
