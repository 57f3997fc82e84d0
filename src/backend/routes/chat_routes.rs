/**
 * Chat Routes
 *
 * - `POST /chats` - Create a chat with a first message
 * - `PUT /chats` - Add members to a chat
 * - `GET /chats` - The caller's chats with their latest message
 * - `GET /chats/{chat_id}` - Member emails of a chat
 * - `PUT /chats/{chat_id}` - Join a chat
 * - `DELETE /chats/{chat_id}/{email}` - Remove a member
 * - `GET /chat_members/{chat_id}` - Member records of a chat
 * - `POST /messages/typing` - Typing indicator
 * - `PUT /pushy`, `DELETE /pushy` - Device token registration
 */

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::chat::handlers::{
    add_members, chat_emails, create_chat, handle_typing_event, join_chat, list_chat_members,
    list_chats, remove_member,
};
use crate::backend::notifications::{register_device, remove_devices};
use crate::backend::server::state::AppState;

/// Add the chat, typing and device routes to `router`
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/chats", post(create_chat).put(add_members).get(list_chats))
        .route("/chats/{chat_id}", get(chat_emails).put(join_chat))
        .route("/chats/{chat_id}/{email}", delete(remove_member))
        .route("/chat_members/{chat_id}", get(list_chat_members))
        .route("/messages/typing", post(handle_typing_event))
        .route("/pushy", put(register_device).delete(remove_devices))
}
