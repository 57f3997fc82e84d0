/**
 * Chat Handlers
 *
 * Creating chats and changing who belongs to them. Membership rules live in
 * `chat::workflow`; these handlers only parse the request and shape the
 * response body.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::backend::chat::workflow::{self, MemberAddition, NewChat};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    require_id, AddMembersRequest, ChatListResponse, CreateChatRequest, CreateChatResponse,
    SuccessResponse,
};

/// Create a chat with a first message
///
/// `POST /chats`
///
/// # Example Request
///
/// ```json
/// {"name": "Trio", "memberIds": [20, 30], "firstMessage": "hello"}
/// ```
pub async fn create_chat(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<Json<CreateChatResponse>, BackendError> {
    let Json(body) = payload?;
    let chat = NewChat::from_request(&body)?;
    let created = workflow::create_chat(&state.db_pool, &state.notifier, &caller, chat).await?;
    Ok(Json(created))
}

/// Add members to a chat
///
/// `PUT /chats`
pub async fn add_members(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<AddMembersRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let Json(body) = payload?;
    let addition = MemberAddition::from_request(&body)?;
    workflow::add_members(&state.db_pool, &state.notifier, &caller, addition).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Join a chat
///
/// `PUT /chats/:chatId`
pub async fn join_chat(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(chat_id): Path<String>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let chat_id = require_id(&chat_id, "chatId")?;
    workflow::join_chat(&state.db_pool, &caller, chat_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Remove a member from a chat by email
///
/// `DELETE /chats/:chatId/:email`
pub async fn remove_member(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((chat_id, email)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let chat_id = require_id(&chat_id, "chatId")?;
    workflow::remove_member(&state.db_pool, &state.notifier, &caller, chat_id, &email).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// List the caller's chats with their latest message
///
/// `GET /chats`
pub async fn list_chats(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ChatListResponse>, BackendError> {
    let data = workflow::list_chats(&state.db_pool, &caller).await?;
    Ok(Json(ChatListResponse {
        success: true,
        data,
    }))
}
