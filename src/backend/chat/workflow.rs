//! Chat Workflow
//!
//! Creating chats, changing their membership and the read-only chat
//! projections. Multi-step operations run in one transaction; the message
//! fan-out is emitted only after it commits, to the membership as it stands
//! at commit time.

use std::collections::BTreeSet;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::members::{member_id_by_email, verified_member_ids};
use crate::backend::chat::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthenticatedMember;
use crate::backend::notifications::Notifier;
use crate::backend::server::database::begin_write;
use crate::shared::messaging::{
    is_string_provided, numeric_ids, AddMembersRequest, ChatEmailsResponse, ChatSummary,
    CreateChatRequest, CreateChatResponse, IdParam, MemberInfo, TypingRequest,
};
use crate::shared::{ChatId, ErrorKind, MemberId, PushPayload};

/// A chat to create, as parsed from `POST /chats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChat {
    pub name: String,
    /// Requested invitees before filtering to verified members
    pub invitees: Vec<MemberId>,
    pub first_message: String,
}

impl NewChat {
    /// An absent `memberIds` is missing information; an empty list is a
    /// chat of one. Non-numeric entries are dropped.
    pub fn from_request(request: &CreateChatRequest) -> Result<Self, ErrorKind> {
        let (Some(name), Some(first_message), Some(member_ids)) = (
            request.name.as_deref(),
            request.first_message.as_deref(),
            request.member_ids.as_ref(),
        ) else {
            return Err(ErrorKind::MissingFields);
        };
        if !is_string_provided(Some(name)) || !is_string_provided(Some(first_message)) {
            return Err(ErrorKind::MissingFields);
        }

        Ok(Self {
            name: name.trim().to_string(),
            invitees: numeric_ids(member_ids),
            first_message: first_message.to_string(),
        })
    }
}

/// Members to (re-)add to a chat, as parsed from `PUT /chats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAddition {
    pub chat_id: ChatId,
    pub invitees: Vec<MemberId>,
    /// Posted to the chat by the actor
    pub note: String,
}

impl MemberAddition {
    pub fn from_request(request: &AddMembersRequest) -> Result<Self, ErrorKind> {
        let chat_id = required_chat_id(request.chat_id.as_ref())?;
        let (Some(member_ids), Some(note)) = (request.member_ids.as_ref(), request.message.as_deref())
        else {
            return Err(ErrorKind::MissingFields);
        };
        if !is_string_provided(Some(note)) {
            return Err(ErrorKind::MissingFields);
        }

        Ok(Self {
            chat_id: parse_chat_id(chat_id)?,
            invitees: numeric_ids(member_ids),
            note: note.to_string(),
        })
    }
}

/// A typing indicator change, as parsed from `POST /messages/typing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingChange {
    pub chat_id: ChatId,
    pub is_typing: bool,
}

impl TypingChange {
    pub fn from_request(request: &TypingRequest) -> Result<Self, ErrorKind> {
        let chat_id = required_chat_id(request.chat_id.as_ref())?;
        let is_typing = request.is_starting_to_type.ok_or(ErrorKind::MissingFields)?;
        Ok(Self {
            chat_id: parse_chat_id(chat_id)?,
            is_typing,
        })
    }
}

/// A missing chat id is reported ahead of other missing fields, a malformed
/// one after them.
fn required_chat_id(chat_id: Option<&IdParam>) -> Result<&IdParam, ErrorKind> {
    chat_id
        .filter(|id| !id.is_blank())
        .ok_or(ErrorKind::MissingFields)
}

fn parse_chat_id(chat_id: &IdParam) -> Result<ChatId, ErrorKind> {
    chat_id.as_id().ok_or(ErrorKind::invalid_parameter("chatId"))
}

/// Create a chat with the caller, the verified invitees and a first message
///
/// Unknown and unverified invitees are silently dropped.
pub async fn create_chat(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    chat: NewChat,
) -> Result<CreateChatResponse, BackendError> {
    let mut tx = begin_write(pool).await?;

    let mut members: BTreeSet<MemberId> = verified_member_ids(&mut tx, &chat.invitees)
        .await?
        .into_iter()
        .collect();
    members.insert(caller.member_id);
    let members: Vec<MemberId> = members.into_iter().collect();

    let chat_id = db::insert_chat(&mut tx, &chat.name).await?;
    db::insert_members(&mut tx, chat_id, &members).await?;
    let message =
        db::insert_message(&mut tx, chat_id, caller.member_id, &chat.first_message, Utc::now())
            .await?;
    tx.commit().await?;

    tracing::info!(chat_id, creator = caller.member_id, members = members.len(), "Chat created");
    notifier.notify(members, PushPayload::message(message));

    Ok(CreateChatResponse {
        success: true,
        chat_id,
        chat_name: chat.name,
    })
}

/// Add verified invitees to an existing chat and post the actor's note
///
/// Re-adding a current member is a no-op: memberships being added are
/// removed first and then inserted again.
pub async fn add_members(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    addition: MemberAddition,
) -> Result<(), BackendError> {
    let chat_id = addition.chat_id;
    let mut tx = begin_write(pool).await?;

    if !db::chat_exists(&mut tx, chat_id).await? {
        return Err(ErrorKind::ChatNotFound.into());
    }

    let added = verified_member_ids(&mut tx, &addition.invitees).await?;
    db::delete_members(&mut tx, chat_id, &added).await?;
    db::insert_members(&mut tx, chat_id, &added).await?;

    let message = db::insert_message(&mut tx, chat_id, caller.member_id, &addition.note, Utc::now())
        .await?;
    let recipients = db::member_ids(&mut tx, chat_id).await?;
    tx.commit().await?;

    tracing::info!(chat_id, actor = caller.member_id, added = ?added, "Chat members added");
    notifier.notify(recipients, PushPayload::message(message));
    Ok(())
}

/// Add the caller to a chat
pub async fn join_chat(
    pool: &SqlitePool,
    caller: &AuthenticatedMember,
    chat_id: ChatId,
) -> Result<(), BackendError> {
    let mut tx = begin_write(pool).await?;

    if !db::chat_exists(&mut tx, chat_id).await? {
        return Err(ErrorKind::ChatNotFound.into());
    }
    if db::is_member(&mut tx, chat_id, caller.member_id).await? {
        return Err(ErrorKind::AlreadyJoined.into());
    }
    db::insert_members(&mut tx, chat_id, &[caller.member_id]).await?;
    tx.commit().await?;

    tracing::info!(chat_id, member = caller.member_id, "Member joined chat");
    Ok(())
}

/// Remove the member with `email` from a chat
///
/// The remaining members and the removed member are notified.
pub async fn remove_member(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    chat_id: ChatId,
    email: &str,
) -> Result<(), BackendError> {
    let mut tx = begin_write(pool).await?;

    if !db::chat_exists(&mut tx, chat_id).await? {
        return Err(ErrorKind::ChatNotFound.into());
    }
    let member_id = member_id_by_email(&mut tx, email)
        .await?
        .ok_or(ErrorKind::EmailNotFound)?;
    if !db::is_member(&mut tx, chat_id, member_id).await? {
        return Err(ErrorKind::NotInChat.into());
    }

    db::delete_members(&mut tx, chat_id, &[member_id]).await?;
    let mut recipients = db::member_ids(&mut tx, chat_id).await?;
    tx.commit().await?;

    tracing::info!(chat_id, actor = caller.member_id, removed = member_id, "Chat member removed");
    recipients.push(member_id);
    notifier.notify(
        recipients,
        PushPayload::ChatMemberRemoved {
            chatid: chat_id,
            memberid: member_id,
        },
    );
    Ok(())
}

/// Members of a chat other than the caller and the system member
pub async fn list_members(
    pool: &SqlitePool,
    caller: &AuthenticatedMember,
    chat_id: ChatId,
) -> Result<Vec<MemberInfo>, BackendError> {
    let mut conn = pool.acquire().await?;
    if !db::chat_exists(&mut conn, chat_id).await? {
        return Err(ErrorKind::ChatNotFound.into());
    }
    Ok(db::member_infos(&mut conn, chat_id, caller.member_id).await?)
}

/// Emails of every member of a chat
pub async fn chat_emails(pool: &SqlitePool, chat_id: ChatId) -> Result<ChatEmailsResponse, BackendError> {
    let mut conn = pool.acquire().await?;
    if !db::chat_exists(&mut conn, chat_id).await? {
        return Err(ErrorKind::ChatNotFound.into());
    }
    let rows = db::member_emails(&mut conn, chat_id).await?;
    Ok(ChatEmailsResponse {
        row_count: rows.len(),
        rows,
    })
}

/// The caller's chats with their most recent message, newest first
pub async fn list_chats(
    pool: &SqlitePool,
    caller: &AuthenticatedMember,
) -> Result<Vec<ChatSummary>, BackendError> {
    let mut conn = pool.acquire().await?;
    Ok(db::chat_summaries(&mut conn, caller.member_id).await?)
}

/// Tell the other members of a chat the caller started or stopped typing
pub async fn typing(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    change: TypingChange,
) -> Result<(), BackendError> {
    let chat_id = change.chat_id;
    let others: Vec<MemberId> = {
        let mut conn = pool.acquire().await?;
        if !db::chat_exists(&mut conn, chat_id).await? {
            return Err(ErrorKind::ChatNotFound.into());
        }
        if !db::is_member(&mut conn, chat_id, caller.member_id).await? {
            return Err(ErrorKind::NotInChat.into());
        }
        db::member_ids(&mut conn, chat_id)
            .await?
            .into_iter()
            .filter(|id| *id != caller.member_id)
            .collect()
    };

    notifier.notify(
        others,
        PushPayload::typing(chat_id, caller.member_id, &caller.nickname, change.is_typing),
    );
    Ok(())
}
