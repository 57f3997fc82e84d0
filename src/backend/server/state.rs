/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The SQLite connection pool
 * - The notifier handle feeding the push dispatcher
 * - The loaded server configuration
 *
 * Every field is cheap to clone and safe to share between request tasks.
 *
 * # Example
 *
 * ```rust,no_run
 * use pocketchat::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let _pool = &state.db_pool;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::notifications::Notifier;
use crate::backend::server::config::ServerConfig;

/// Main application state
#[derive(Clone)]
pub struct AppState {
    /// Relationship, membership and message store
    pub db_pool: SqlitePool,
    /// Push notification queue
    pub notifier: Notifier,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, notifier: Notifier, config: ServerConfig) -> Self {
        Self {
            db_pool,
            notifier,
            config: Arc::new(config),
        }
    }

    /// Secret used to sign and verify bearer tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}

impl FromRef<AppState> for Notifier {
    fn from_ref(state: &AppState) -> Self {
        state.notifier.clone()
    }
}
