/**
 * Router Configuration
 *
 * Combines every route group into one Axum router. All routes sit behind
 * the identity middleware; unknown paths fall through to a JSON 404.
 */

use axum::{http::StatusCode, middleware, response::IntoResponse, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::backend::middleware::auth_middleware;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::routes::contact_routes::configure_contact_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Layers
///
/// 1. **Identity**: `auth_middleware` resolves the caller from the bearer token
/// 2. **Tracing**: `TraceLayer` logs every request
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_contact_routes(router);
    let router = configure_chat_routes(router);

    router
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
}
