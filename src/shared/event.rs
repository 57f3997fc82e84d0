/**
 * Push Notification Payloads
 *
 * This module defines the data pushed to members' devices when a contact
 * relationship or chat membership changes, or a message is posted.
 *
 * Payloads are serialized as flat JSON objects tagged by `type`, with ids
 * rendered as strings the way mobile clients expect them:
 *
 * ```json
 * {"type": "newContactRequest", "toId": "20", "fromId": "10", "fromNickname": "alice"}
 * ```
 */
use serde::{Deserialize, Serialize};

use crate::shared::messaging::{ChatId, ChatMessage, MemberId};

/// Data delivered to every registered device of the recipients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PushPayload {
    /// A message was posted to a chat
    #[serde(rename = "msg")]
    Message { message: ChatMessage, chatid: ChatId },

    /// A contact request was created
    #[serde(rename = "newContactRequest", rename_all = "camelCase")]
    NewContactRequest {
        to_id: String,
        from_id: String,
        from_nickname: String,
    },

    /// A contact request was accepted or rejected
    #[serde(rename = "contactRequestResponse", rename_all = "camelCase")]
    ContactRequestResponse {
        to_id: String,
        from_id: String,
        from_nickname: String,
        is_accept: bool,
    },

    /// An outgoing contact request was withdrawn
    #[serde(rename = "contactRequestDeleted", rename_all = "camelCase")]
    ContactRequestDeleted {
        to_id: String,
        from_id: String,
        from_nickname: String,
    },

    /// A contact relationship was deleted
    #[serde(rename = "contactDeleted", rename_all = "camelCase")]
    ContactDeleted {
        deleted_id: String,
        deletor_id: String,
        from_nickname: String,
    },

    /// A member was removed from a chat
    #[serde(rename = "chatMemberRemoved")]
    ChatMemberRemoved { chatid: ChatId, memberid: MemberId },

    /// A member started or stopped typing in a chat
    #[serde(rename = "typing", rename_all = "camelCase")]
    Typing {
        chatid: ChatId,
        memberid: MemberId,
        nickname: String,
        is_typing: bool,
    },
}

impl PushPayload {
    /// Create a message event
    pub fn message(message: ChatMessage) -> Self {
        let chatid = message.chatid;
        Self::Message { message, chatid }
    }

    /// Create a new contact request event
    pub fn new_contact_request(to: MemberId, from: MemberId, from_nickname: &str) -> Self {
        Self::NewContactRequest {
            to_id: to.to_string(),
            from_id: from.to_string(),
            from_nickname: from_nickname.to_string(),
        }
    }

    /// Create a contact request response event
    pub fn contact_request_response(
        to: MemberId,
        from: MemberId,
        from_nickname: &str,
        is_accept: bool,
    ) -> Self {
        Self::ContactRequestResponse {
            to_id: to.to_string(),
            from_id: from.to_string(),
            from_nickname: from_nickname.to_string(),
            is_accept,
        }
    }

    /// Create a withdrawn contact request event
    pub fn contact_request_deleted(to: MemberId, from: MemberId, from_nickname: &str) -> Self {
        Self::ContactRequestDeleted {
            to_id: to.to_string(),
            from_id: from.to_string(),
            from_nickname: from_nickname.to_string(),
        }
    }

    /// Create a contact deletion event
    pub fn contact_deleted(deleted: MemberId, deletor: MemberId, from_nickname: &str) -> Self {
        Self::ContactDeleted {
            deleted_id: deleted.to_string(),
            deletor_id: deletor.to_string(),
            from_nickname: from_nickname.to_string(),
        }
    }

    /// Create a typing event
    pub fn typing(chatid: ChatId, memberid: MemberId, nickname: &str, is_typing: bool) -> Self {
        Self::Typing {
            chatid,
            memberid,
            nickname: nickname.to_string(),
            is_typing,
        }
    }

    /// The `type` tag as sent on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "msg",
            Self::NewContactRequest { .. } => "newContactRequest",
            Self::ContactRequestResponse { .. } => "contactRequestResponse",
            Self::ContactRequestDeleted { .. } => "contactRequestDeleted",
            Self::ContactDeleted { .. } => "contactDeleted",
            Self::ChatMemberRemoved { .. } => "chatMemberRemoved",
            Self::Typing { .. } => "typing",
        }
    }
}
