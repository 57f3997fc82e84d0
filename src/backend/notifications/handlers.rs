//! Device registration handlers (`/pushy`)

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::tokens;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{is_string_provided, RegisterTokenRequest, SuccessResponse};
use crate::shared::ErrorKind;

/// Register a device token for the caller
///
/// `PUT /pushy`
pub async fn register_device(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<RegisterTokenRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let Json(body) = payload?;
    let token = body
        .token
        .as_deref()
        .filter(|token| is_string_provided(Some(token)))
        .ok_or(ErrorKind::MissingFields)?;

    let mut conn = state.db_pool.acquire().await?;
    tokens::register_token(&mut conn, caller.member_id, token.trim()).await?;
    tracing::info!(member = caller.member_id, "Push token registered");
    Ok(Json(SuccessResponse::ok()))
}

/// Remove every device token of the caller
///
/// `DELETE /pushy`
pub async fn remove_devices(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<SuccessResponse>, BackendError> {
    let mut conn = state.db_pool.acquire().await?;
    let removed = tokens::remove_tokens(&mut conn, caller.member_id).await?;
    tracing::info!(member = caller.member_id, removed, "Push tokens removed");
    Ok(Json(SuccessResponse::ok()))
}
