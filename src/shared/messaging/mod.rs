//! Messaging Module
//!
//! This module contains the data structures of the contact and chat system:
//!
//! - `ContactInfo` - A member as listed in contacts, requests and search results
//! - `IdentifierType` - Which member column a selector addresses
//! - `ChatMessage` - A message in a chat
//! - Request/response bodies of every contact and chat endpoint
//!
//! # Usage
//!
//! ```rust
//! use pocketchat::shared::messaging::{ContactInfo, IdentifierType, ChatMessage};
//! ```

pub mod contact;
pub mod contact_request;
pub mod chat;
pub mod message;
pub mod device;

use serde::{Deserialize, Serialize};

use crate::shared::error::ErrorKind;

// Re-export all types
pub use contact::{ContactInfo, ContactListResponse, SuccessResponse};
pub use contact_request::{
    CreateContactRequestBody, IdentifierType, ListContactRequestsResponse,
    RespondContactRequestBody,
};
pub use chat::{
    AddMembersRequest, ChatEmailsResponse, ChatListResponse, ChatMembersResponse, ChatSummary,
    CreateChatRequest, CreateChatResponse, MemberEmail, MemberInfo, TypingRequest,
};
pub use message::ChatMessage;
pub use device::RegisterTokenRequest;

/// Identifier of a registered member
pub type MemberId = i64;

/// Identifier of a chat
pub type ChatId = i64;

/// Reserved system/admin member, never listed or searchable
pub const SYSTEM_MEMBER_ID: MemberId = 0;

/// Numeric id as clients send it: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Number(i64),
    Text(String),
}

impl IdParam {
    /// The id, if the value is numeric
    pub fn as_id(&self) -> Option<i64> {
        match self {
            IdParam::Number(id) => Some(*id),
            IdParam::Text(text) => parse_id(text),
        }
    }

    /// True when the client sent an empty string
    pub fn is_blank(&self) -> bool {
        matches!(self, IdParam::Text(text) if text.trim().is_empty())
    }
}

impl From<i64> for IdParam {
    fn from(id: i64) -> Self {
        IdParam::Number(id)
    }
}

/// Parse a path or body id
pub fn parse_id(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parse a required numeric path segment
///
/// A blank segment is missing information; anything else that is not a
/// number is a malformed `name` parameter.
pub fn require_id(raw: &str, name: &'static str) -> Result<i64, ErrorKind> {
    if raw.trim().is_empty() {
        return Err(ErrorKind::MissingFields);
    }
    parse_id(raw).ok_or(ErrorKind::invalid_parameter(name))
}

/// Keep the numeric entries of a raw id list, in order
///
/// Numbers and numeric strings are kept; everything else is dropped.
pub fn numeric_ids(values: &[serde_json::Value]) -> Vec<i64> {
    values
        .iter()
        .filter_map(|value| match value {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => parse_id(s),
            _ => None,
        })
        .collect()
}

/// True when a required string field is present and not blank
pub fn is_string_provided(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}
