/**
 * Member Model and Database Operations
 *
 * This module handles member records: registration, verification and the
 * lookups the contact and chat workflows resolve members with.
 *
 * Nicknames and emails are unique without regard to ASCII case; first and
 * last names are not unique at all, so a selector on them may be
 * ambiguous.
 */

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::shared::messaging::{ContactInfo, IdentifierType};
use crate::shared::{MemberId, SYSTEM_MEMBER_ID};

/// Member struct representing a member in the database
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Member {
    pub memberid: MemberId,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub email: String,
    /// Verified members can be invited to chats
    pub verification: bool,
}

/// Fields of a member being registered
#[derive(Debug, Clone)]
pub struct NewMember {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub email: String,
}

impl NewMember {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        nickname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            nickname: nickname.into(),
            email: email.into(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    memberid: MemberId,
    firstname: String,
    lastname: String,
    nickname: String,
}

impl From<ContactRow> for ContactInfo {
    fn from(row: ContactRow) -> Self {
        ContactInfo {
            memberid: row.memberid,
            first: row.firstname,
            last: row.lastname,
            nickname: row.nickname,
        }
    }
}

/// Create a new, unverified member
///
/// # Arguments
/// * `conn` - Database connection
/// * `member` - Registration fields
///
/// # Returns
/// Created member, or a store error when the nickname or email is taken
pub async fn create_member(
    conn: &mut SqliteConnection,
    member: NewMember,
) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members (firstname, lastname, nickname, email, verification)
        VALUES (?, ?, ?, ?, 0)
        RETURNING memberid, firstname, lastname, nickname, email, verification
        "#,
    )
    .bind(&member.firstname)
    .bind(&member.lastname)
    .bind(&member.nickname)
    .bind(&member.email)
    .fetch_one(&mut *conn)
    .await
}

/// Mark a member verified
///
/// Verification moves from 0 to 1 at most once.
///
/// # Returns
/// `true` if this call verified the member, `false` if the member was
/// already verified or does not exist
pub async fn verify_member(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE members SET verification = 1 WHERE memberid = ? AND verification = 0")
            .bind(member_id)
            .execute(&mut *conn)
            .await?;
    Ok(result.rows_affected() == 1)
}

/// Get member by ID
pub async fn get_member_by_id(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "SELECT memberid, firstname, lastname, nickname, email, verification
         FROM members WHERE memberid = ?",
    )
    .bind(member_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Check whether a member exists
pub async fn member_exists(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM members WHERE memberid = ?")
        .bind(member_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Get a member ID by email, ignoring case
pub async fn member_id_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<MemberId>, sqlx::Error> {
    sqlx::query_scalar("SELECT memberid FROM members WHERE email = ?")
        .bind(email.trim())
        .fetch_optional(&mut *conn)
        .await
}

/// Members whose `kind` column equals `value`, ignoring case
///
/// The system member never matches. At most two ids are returned, which is
/// enough to tell a unique match from an ambiguous one.
pub async fn find_member_ids(
    conn: &mut SqliteConnection,
    kind: IdentifierType,
    value: &str,
) -> Result<Vec<MemberId>, sqlx::Error> {
    let sql = format!(
        "SELECT memberid FROM members WHERE {} = ? COLLATE NOCASE AND memberid <> ? ORDER BY memberid LIMIT 2",
        kind.column()
    );
    sqlx::query_scalar(&sql)
        .bind(value.trim())
        .bind(SYSTEM_MEMBER_ID)
        .fetch_all(&mut *conn)
        .await
}

/// Contact information of every member in `member_ids`
///
/// Unknown ids are skipped. Rows come back in member id order.
pub async fn contact_info_for(
    conn: &mut SqliteConnection,
    member_ids: &[MemberId],
) -> Result<Vec<ContactInfo>, sqlx::Error> {
    if member_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT memberid, firstname, lastname, nickname FROM members WHERE memberid IN (",
    );
    let mut separated = query.separated(", ");
    for id in member_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY memberid");

    let rows = query
        .build_query_as::<ContactRow>()
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(ContactInfo::from).collect())
}

/// The subset of `member_ids` that exist and are verified
///
/// The system member is never included.
pub async fn verified_member_ids(
    conn: &mut SqliteConnection,
    member_ids: &[MemberId],
) -> Result<Vec<MemberId>, sqlx::Error> {
    if member_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT memberid FROM members WHERE verification = 1 AND memberid <> ");
    query.push_bind(SYSTEM_MEMBER_ID);
    query.push(" AND memberid IN (");
    let mut separated = query.separated(", ");
    for id in member_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY memberid");

    query
        .build_query_scalar::<MemberId>()
        .fetch_all(&mut *conn)
        .await
}
