//! Database operations for contact relationships
//!
//! Pending requests are directional rows `(memberid_a asked memberid_b)`.
//! Confirmed contacts are stored once per pair and read in both directions.

use sqlx::SqliteConnection;

use crate::shared::messaging::{ContactInfo, IdentifierType};
use crate::shared::{MemberId, SYSTEM_MEMBER_ID};

/// Relationship between an ordered pair of members `(a, b)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairState {
    /// `a` and `b` are contacts
    pub contact: bool,
    /// `a` has a pending request to `b`
    pub outgoing: bool,
    /// `b` has a pending request to `a`
    pub incoming: bool,
}

impl PairState {
    /// No contact and no request in either direction
    pub fn is_unrelated(&self) -> bool {
        !self.contact && !self.outgoing && !self.incoming
    }
}

/// Read the relationship between `a` and `b`
pub async fn pair_state(
    conn: &mut SqliteConnection,
    a: MemberId,
    b: MemberId,
) -> Result<PairState, sqlx::Error> {
    Ok(PairState {
        contact: contact_exists(conn, a, b).await?,
        outgoing: request_exists(conn, a, b).await?,
        incoming: request_exists(conn, b, a).await?,
    })
}

/// Check for a pending request from `from` to `to`
pub async fn request_exists(
    conn: &mut SqliteConnection,
    from: MemberId,
    to: MemberId,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM contact_requests WHERE memberid_a = ? AND memberid_b = ?")
            .bind(from)
            .bind(to)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(found.is_some())
}

/// Check whether `a` and `b` are contacts, in either column order
pub async fn contact_exists(
    conn: &mut SqliteConnection,
    a: MemberId,
    b: MemberId,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM contacts
         WHERE (memberid_a = ?1 AND memberid_b = ?2) OR (memberid_a = ?2 AND memberid_b = ?1)",
    )
    .bind(a)
    .bind(b)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(found.is_some())
}

/// Record a pending request from `from` to `to`
pub async fn insert_request(
    conn: &mut SqliteConnection,
    from: MemberId,
    to: MemberId,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO contact_requests (memberid_a, memberid_b) VALUES (?, ?)")
        .bind(from)
        .bind(to)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert contact request: {:?}", e);
            e
        })?;
    Ok(())
}

/// Delete the pending request from `from` to `to`
///
/// # Returns
/// Number of rows removed, 0 when there was no such request
pub async fn delete_request(
    conn: &mut SqliteConnection,
    from: MemberId,
    to: MemberId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contact_requests WHERE memberid_a = ? AND memberid_b = ?")
        .bind(from)
        .bind(to)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Delete pending requests between `a` and `b` in both directions
pub async fn delete_requests_between(
    conn: &mut SqliteConnection,
    a: MemberId,
    b: MemberId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM contact_requests
         WHERE (memberid_a = ?1 AND memberid_b = ?2) OR (memberid_a = ?2 AND memberid_b = ?1)",
    )
    .bind(a)
    .bind(b)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

/// Record `a` and `b` as contacts
pub async fn insert_contact(
    conn: &mut SqliteConnection,
    a: MemberId,
    b: MemberId,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO contacts (memberid_a, memberid_b) VALUES (?, ?)")
        .bind(a)
        .bind(b)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert contact: {:?}", e);
            e
        })?;
    Ok(())
}

/// Delete the contact between `a` and `b`, in either column order
pub async fn delete_contact(
    conn: &mut SqliteConnection,
    a: MemberId,
    b: MemberId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM contacts
         WHERE (memberid_a = ?1 AND memberid_b = ?2) OR (memberid_a = ?2 AND memberid_b = ?1)",
    )
    .bind(a)
    .bind(b)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

/// Members who have a pending request to `member_id`
pub async fn requesters_of(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Vec<MemberId>, sqlx::Error> {
    sqlx::query_scalar("SELECT memberid_a FROM contact_requests WHERE memberid_b = ? ORDER BY rowid")
        .bind(member_id)
        .fetch_all(&mut *conn)
        .await
}

/// Members `member_id` has a pending request to
pub async fn request_targets_of(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Vec<MemberId>, sqlx::Error> {
    sqlx::query_scalar("SELECT memberid_b FROM contact_requests WHERE memberid_a = ? ORDER BY rowid")
        .bind(member_id)
        .fetch_all(&mut *conn)
        .await
}

/// Contacts of `member_id`
pub async fn contact_ids_of(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Vec<MemberId>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT CASE WHEN memberid_a = ?1 THEN memberid_b ELSE memberid_a END
         FROM contacts WHERE memberid_a = ?1 OR memberid_b = ?1 ORDER BY rowid",
    )
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await
}

/// Escape `%`, `_` and `\` so `prefix` matches literally in a LIKE pattern
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Members whose `field` starts with `prefix`, ignoring ASCII case
///
/// Excludes the caller, the system member, the caller's contacts and
/// anyone with a pending request to or from the caller.
pub async fn search_members(
    conn: &mut SqliteConnection,
    caller: MemberId,
    field: IdentifierType,
    prefix: &str,
    limit: i64,
) -> Result<Vec<ContactInfo>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT memberid, firstname, lastname, nickname FROM members
        WHERE {column} LIKE ?1 ESCAPE '\'
          AND memberid <> ?2
          AND memberid <> ?3
          AND memberid NOT IN (SELECT memberid_b FROM contacts WHERE memberid_a = ?2)
          AND memberid NOT IN (SELECT memberid_a FROM contacts WHERE memberid_b = ?2)
          AND memberid NOT IN (SELECT memberid_b FROM contact_requests WHERE memberid_a = ?2)
          AND memberid NOT IN (SELECT memberid_a FROM contact_requests WHERE memberid_b = ?2)
        ORDER BY {column} COLLATE NOCASE, memberid
        LIMIT ?4
        "#,
        column = field.column()
    );

    let rows: Vec<(MemberId, String, String, String)> = sqlx::query_as(&sql)
        .bind(like_prefix(prefix.trim()))
        .bind(caller)
        .bind(SYSTEM_MEMBER_ID)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(memberid, first, last, nickname)| ContactInfo {
            memberid,
            first,
            last,
            nickname,
        })
        .collect())
}
