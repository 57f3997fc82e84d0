//! Chat Handlers Module
//!
//! Axum handlers for the chat endpoints:
//!
//! - **`chats`** - create, add members, join, remove a member, list chats
//! - **`members`** - member records and emails of one chat
//! - **`typing`** - typing indicator (POST /messages/typing)

pub mod chats;
pub mod members;
pub mod typing;

pub use chats::{add_members, create_chat, join_chat, list_chats, remove_member};
pub use members::{chat_emails, list_chat_members};
pub use typing::handle_typing_event;
