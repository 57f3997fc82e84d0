//! Chat Backend Module
//!
//! Group chats: the membership store, the chat workflow and its handlers.
//!
//! # Architecture
//!
//! - **`db`** - Chats, memberships and the message log
//! - **`workflow`** - Create/add/join/remove and the read-only projections
//! - **`handlers`** - HTTP handlers (`/chats`, `/chat_members`, `/messages/typing`)

/// Database operations for chats, memberships and messages
pub mod db;

/// Chat workflow steps
pub mod workflow;

/// HTTP handlers
pub mod handlers;

pub use handlers::*;
