//! Authentication test helpers
//!
//! Provides utilities for creating test members and generating tokens.

use pocketchat::backend::auth::members::{create_member, verify_member, NewMember};
use pocketchat::backend::auth::sessions::create_token;
use pocketchat::shared::MemberId;
use sqlx::SqlitePool;

/// Secret the test server signs and verifies tokens with
pub const TEST_JWT_SECRET: &str = "pocketchat-test-secret";

/// Test member credentials
#[derive(Debug, Clone)]
pub struct TestMember {
    pub id: MemberId,
    pub nickname: String,
    pub email: String,
    pub token: String,
}

/// Create a verified test member in the database
///
/// The email is `<nickname>@example.com` and the first name is the
/// capitalized nickname.
pub async fn create_test_member(pool: &SqlitePool, nickname: &str) -> TestMember {
    let member = create_unverified_member(pool, nickname).await;
    let mut conn = pool.acquire().await.unwrap();
    verify_member(&mut conn, member.id)
        .await
        .expect("Failed to verify test member");
    member
}

/// Create a test member that never completed verification
pub async fn create_unverified_member(pool: &SqlitePool, nickname: &str) -> TestMember {
    let mut first = nickname.to_string();
    if let Some(c) = first.get_mut(0..1) {
        c.make_ascii_uppercase();
    }
    let email = format!("{nickname}@example.com");

    let mut conn = pool.acquire().await.unwrap();
    let member = create_member(&mut conn, NewMember::new(first, "Tester", nickname, email))
        .await
        .expect("Failed to create test member");
    let token = create_token(TEST_JWT_SECRET, &member).expect("Failed to create test token");

    TestMember {
        id: member.memberid,
        nickname: member.nickname,
        email: member.email,
        token,
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Attach a member's bearer token to a test request
pub trait AsMember {
    fn as_member(self, member: &TestMember) -> Self;
}

impl AsMember for axum_test::TestRequest {
    fn as_member(self, member: &TestMember) -> Self {
        let value = axum::http::HeaderValue::from_str(&auth_header(&member.token))
            .expect("Token is not a valid header value");
        self.add_header(axum::http::header::AUTHORIZATION, value)
    }
}
