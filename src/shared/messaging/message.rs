//! Chat Message Data Structure
//!
//! Represents a message posted to a chat. Messages are append-only: once
//! stored they are never edited.

use serde::{Deserialize, Serialize};

use super::{ChatId, MemberId};

/// A stored chat message as delivered in push notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub messageid: i64,
    pub chatid: ChatId,
    pub message: String,
    /// Author of the message
    pub memberid: MemberId,
    /// Author's nickname at the time of posting
    pub nickname: String,
    /// RFC3339 timestamp assigned by the server
    pub timestamp: String,
}
