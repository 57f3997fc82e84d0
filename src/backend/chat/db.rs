/**
 * Database Operations for Chats, Memberships and Messages
 *
 * This module is the membership store: which members belong to which chat,
 * plus the append-only message log each chat carries.
 */

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::shared::messaging::{ChatMessage, ChatSummary, MemberEmail, MemberInfo};
use crate::shared::{ChatId, MemberId, SYSTEM_MEMBER_ID};

/// Create a chat
///
/// # Returns
/// Id of the new chat
pub async fn insert_chat(conn: &mut SqliteConnection, name: &str) -> Result<ChatId, sqlx::Error> {
    let result = sqlx::query("INSERT INTO chats (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert chat: {:?}", e);
            e
        })?;
    Ok(result.last_insert_rowid())
}

/// Check whether a chat exists
pub async fn chat_exists(conn: &mut SqliteConnection, chat_id: ChatId) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM chats WHERE chatid = ?")
        .bind(chat_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Check whether `member_id` belongs to `chat_id`
pub async fn is_member(
    conn: &mut SqliteConnection,
    chat_id: ChatId,
    member_id: MemberId,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM chatmembers WHERE chatid = ? AND memberid = ?")
            .bind(chat_id)
            .bind(member_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(found.is_some())
}

/// Add every member in `member_ids` to `chat_id`
///
/// `member_ids` must not contain duplicates or current members.
pub async fn insert_members(
    conn: &mut SqliteConnection,
    chat_id: ChatId,
    member_ids: &[MemberId],
) -> Result<(), sqlx::Error> {
    if member_ids.is_empty() {
        return Ok(());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO chatmembers (chatid, memberid) ");
    query.push_values(member_ids, |mut row, member_id| {
        row.push_bind(chat_id).push_bind(*member_id);
    });

    query.build().execute(&mut *conn).await.map_err(|e| {
        tracing::error!("Failed to insert chat members: {:?}", e);
        e
    })?;
    Ok(())
}

/// Remove every member in `member_ids` from `chat_id`
///
/// # Returns
/// Number of memberships removed
pub async fn delete_members(
    conn: &mut SqliteConnection,
    chat_id: ChatId,
    member_ids: &[MemberId],
) -> Result<u64, sqlx::Error> {
    if member_ids.is_empty() {
        return Ok(0);
    }

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("DELETE FROM chatmembers WHERE chatid = ");
    query.push_bind(chat_id);
    query.push(" AND memberid IN (");
    let mut separated = query.separated(", ");
    for id in member_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let result = query.build().execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// Current member ids of a chat
pub async fn member_ids(
    conn: &mut SqliteConnection,
    chat_id: ChatId,
) -> Result<Vec<MemberId>, sqlx::Error> {
    sqlx::query_scalar("SELECT memberid FROM chatmembers WHERE chatid = ? ORDER BY memberid")
        .bind(chat_id)
        .fetch_all(&mut *conn)
        .await
}

/// Member records of a chat, without `excluded` and the system member
pub async fn member_infos(
    conn: &mut SqliteConnection,
    chat_id: ChatId,
    excluded: MemberId,
) -> Result<Vec<MemberInfo>, sqlx::Error> {
    let rows: Vec<(MemberId, String, String, String, String)> = sqlx::query_as(
        r#"
        SELECT m.memberid, m.firstname, m.lastname, m.nickname, m.email
        FROM chatmembers c JOIN members m ON m.memberid = c.memberid
        WHERE c.chatid = ? AND m.memberid <> ? AND m.memberid <> ?
        ORDER BY m.memberid
        "#,
    )
    .bind(chat_id)
    .bind(excluded)
    .bind(SYSTEM_MEMBER_ID)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(memberid, firstname, lastname, nickname, email)| MemberInfo {
            memberid,
            firstname,
            lastname,
            nickname,
            email,
        })
        .collect())
}

/// Emails of every member of a chat
pub async fn member_emails(
    conn: &mut SqliteConnection,
    chat_id: ChatId,
) -> Result<Vec<MemberEmail>, sqlx::Error> {
    let emails: Vec<String> = sqlx::query_scalar(
        "SELECT m.email FROM chatmembers c JOIN members m ON m.memberid = c.memberid
         WHERE c.chatid = ? ORDER BY m.memberid",
    )
    .bind(chat_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(emails.into_iter().map(|email| MemberEmail { email }).collect())
}

/// Append a message to a chat
///
/// # Arguments
/// * `conn` - Database connection
/// * `chat_id` - Chat the message is posted to
/// * `author` - Member posting the message
/// * `text` - Message body
/// * `at` - Time of posting
///
/// # Returns
/// The stored message with the author's current nickname
pub async fn insert_message(
    conn: &mut SqliteConnection,
    chat_id: ChatId,
    author: MemberId,
    text: &str,
    at: DateTime<Utc>,
) -> Result<ChatMessage, sqlx::Error> {
    let timestamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let result =
        sqlx::query("INSERT INTO messages (chatid, message, memberid, timestamp) VALUES (?, ?, ?, ?)")
            .bind(chat_id)
            .bind(text)
            .bind(author)
            .bind(&timestamp)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert message: {:?}", e);
                e
            })?;

    let nickname: String = sqlx::query_scalar("SELECT nickname FROM members WHERE memberid = ?")
        .bind(author)
        .fetch_one(&mut *conn)
        .await?;

    Ok(ChatMessage {
        messageid: result.last_insert_rowid(),
        chatid: chat_id,
        message: text.to_string(),
        memberid: author,
        nickname,
        timestamp,
    })
}

/// Most recent message of every chat `member_id` belongs to, newest first
pub async fn chat_summaries(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Vec<ChatSummary>, sqlx::Error> {
    let rows: Vec<(ChatId, String, String, String)> = sqlx::query_as(
        r#"
        SELECT c.chatid, c.name, m.message, m.timestamp
        FROM chats c
        JOIN chatmembers cm ON cm.chatid = c.chatid AND cm.memberid = ?
        JOIN messages m ON m.primarykey = (
            SELECT MAX(primarykey) FROM messages WHERE chatid = c.chatid
        )
        ORDER BY m.primarykey DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(chatid, chat_name, message, timestamp)| ChatSummary {
            chatid,
            chat_name,
            message,
            timestamp,
        })
        .collect())
}
