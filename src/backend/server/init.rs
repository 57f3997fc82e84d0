/**
 * Server Initialization
 *
 * Builds the application from a loaded `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the database and apply migrations
 * 2. Create the notification queue
 * 3. Spawn the push dispatcher with the configured gateway
 * 4. Create the router
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::notifications::{spawn_dispatcher, Gateway, Notifier};
use crate::backend::routes::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::database::load_database;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated. Push delivery
/// problems never fail startup; they are logged by the dispatcher.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing pocketchat backend server");

    let db_pool = load_database(&config).await?;

    let (notifier, receiver) = Notifier::channel();
    let gateway = Gateway::from_config(&config);
    spawn_dispatcher(db_pool.clone(), gateway, receiver);

    let app_state = AppState::new(db_pool, notifier, config);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
