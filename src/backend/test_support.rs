//! Fixtures for unit tests

use sqlx::SqlitePool;

use crate::backend::auth::members::{create_member, verify_member, NewMember};
use crate::backend::middleware::AuthenticatedMember;

/// Register and verify a member named after `nickname`
pub(crate) async fn member(pool: &SqlitePool, nickname: &str) -> AuthenticatedMember {
    let caller = unverified_member(pool, nickname).await;
    let mut conn = pool.acquire().await.unwrap();
    verify_member(&mut conn, caller.member_id).await.unwrap();
    caller
}

/// Register a member without verifying them
pub(crate) async fn unverified_member(pool: &SqlitePool, nickname: &str) -> AuthenticatedMember {
    let mut conn = pool.acquire().await.unwrap();
    let email = format!("{nickname}@example.com");
    let mut first = nickname.to_string();
    if let Some(c) = first.get_mut(0..1) {
        c.make_ascii_uppercase();
    }
    let created = create_member(&mut conn, NewMember::new(first, "Tester", nickname, &email))
        .await
        .unwrap();
    AuthenticatedMember {
        member_id: created.memberid,
        nickname: created.nickname,
        email: created.email,
    }
}
