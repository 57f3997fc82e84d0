//! Chat Data Structures
//!
//! Represents named group chats, their members and the request/response
//! bodies of the chat endpoints.

use serde::{Deserialize, Serialize};

use super::{ChatId, IdParam, MemberId};

/// Request body of `POST /chats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Invitees, not including the creator. Raw JSON values: entries that
    /// are not numeric ids are dropped rather than rejected.
    #[serde(default)]
    pub member_ids: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub first_message: Option<String>,
}

/// Response of `POST /chats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateChatResponse {
    pub success: bool,
    #[serde(rename = "chatID")]
    pub chat_id: ChatId,
    #[serde(rename = "chatName")]
    pub chat_name: String,
}

/// Request body of `PUT /chats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMembersRequest {
    #[serde(default)]
    pub chat_id: Option<IdParam>,
    #[serde(default)]
    pub member_ids: Option<Vec<serde_json::Value>>,
    /// Note posted to the chat about who was added
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body of `POST /messages/typing`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingRequest {
    #[serde(default)]
    pub chat_id: Option<IdParam>,
    #[serde(default)]
    pub is_starting_to_type: Option<bool>,
}

/// Email row of `GET /chats/:chatId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberEmail {
    pub email: String,
}

/// Response of `GET /chats/:chatId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatEmailsResponse {
    pub row_count: usize,
    pub rows: Vec<MemberEmail>,
}

/// Member record of `GET /chat_members/:chatId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberInfo {
    pub memberid: MemberId,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub email: String,
}

/// Response of `GET /chat_members/:chatId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMembersResponse {
    pub success: bool,
    pub chat_members_list: Vec<MemberInfo>,
}

/// One row of the chat list: a chat and its most recent message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSummary {
    pub chatid: ChatId,
    pub chat_name: String,
    pub message: String,
    /// RFC3339 timestamp of the most recent message
    pub timestamp: String,
}

/// Response of `GET /chats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatListResponse {
    pub success: bool,
    pub data: Vec<ChatSummary>,
}
