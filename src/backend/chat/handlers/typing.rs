/**
 * Typing Indicator Handler
 *
 * Implements POST /messages/typing. The indicator is pushed to the other
 * members of the chat and never stored.
 *
 * # Event Flow
 *
 * 1. Client sends `{chatId, isStartingToType}`
 * 2. Server checks the chat exists and the caller belongs to it
 * 3. A `typing` notification is queued for every other member
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::backend::chat::workflow::{self, TypingChange};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{SuccessResponse, TypingRequest};

/// Handle typing indicator event (POST /messages/typing)
///
/// # Errors
///
/// * `400 Bad Request` - missing or non-numeric `chatId`, or caller not in the chat
/// * `404 Not Found` - chat does not exist
pub async fn handle_typing_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<TypingRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let Json(body) = payload?;
    let change = TypingChange::from_request(&body)?;

    tracing::debug!(
        chat_id = change.chat_id,
        member = caller.member_id,
        is_typing = change.is_typing,
        "Typing event"
    );
    workflow::typing(&state.db_pool, &state.notifier, &caller, change).await?;
    Ok(Json(SuccessResponse::ok()))
}
