//! Device token storage
//!
//! A member may register any number of devices. A token belongs to the
//! member who registered it most recently, so a phone that changes hands
//! stops receiving the previous owner's notifications.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::shared::MemberId;

/// Register `token` for `member_id`, taking it over from any previous owner
pub async fn register_token(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    token: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO push_tokens (token, memberid) VALUES (?, ?)
         ON CONFLICT (token) DO UPDATE SET memberid = excluded.memberid",
    )
    .bind(token)
    .bind(member_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to register push token: {:?}", e);
        e
    })?;
    Ok(())
}

/// Remove every token registered by `member_id`
pub async fn remove_tokens(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM push_tokens WHERE memberid = ?")
        .bind(member_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Device tokens of every member in `member_ids`
pub async fn tokens_for(
    conn: &mut SqliteConnection,
    member_ids: &[MemberId],
) -> Result<Vec<String>, sqlx::Error> {
    if member_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT token FROM push_tokens WHERE memberid IN (");
    let mut separated = query.separated(", ");
    for id in member_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY memberid, token");

    query
        .build_query_scalar::<String>()
        .fetch_all(&mut *conn)
        .await
}
