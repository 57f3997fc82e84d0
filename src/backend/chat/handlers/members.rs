//! Chat member projections

use axum::{
    extract::{Path, State},
    Json,
};

use crate::backend::chat::workflow;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{require_id, ChatEmailsResponse, ChatMembersResponse};

/// Emails of every member of a chat
///
/// `GET /chats/:chatId`
pub async fn chat_emails(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatEmailsResponse>, BackendError> {
    let chat_id = require_id(&chat_id, "chatId")?;
    Ok(Json(workflow::chat_emails(&state.db_pool, chat_id).await?))
}

/// Members of a chat other than the caller
///
/// `GET /chat_members/:chatId`
pub async fn list_chat_members(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatMembersResponse>, BackendError> {
    let chat_id = require_id(&chat_id, "chatId")?;
    let chat_members_list = workflow::list_members(&state.db_pool, &caller, chat_id).await?;
    Ok(Json(ChatMembersResponse {
        success: true,
        chat_members_list,
    }))
}
