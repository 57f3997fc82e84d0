//! Database migration tests
//!
//! Tests to ensure migrations run correctly and database schema is valid

use pocketchat::backend::server::database::run_migrations;

use crate::common::database::create_test_pool;

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = create_test_pool().await;
    let result = run_migrations(&pool).await;
    assert!(result.is_ok(), "Migrations should run twice without error");
}

#[tokio::test]
async fn test_tables_exist() {
    let pool = create_test_pool().await;

    for table in ["members", "contact_requests", "contacts", "chats", "chatmembers", "messages", "push_tokens"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {table} LIMIT 1"))
            .execute(&pool)
            .await;
        assert!(result.is_ok(), "{table} table should exist");
    }
}

#[tokio::test]
async fn test_system_member_is_seeded() {
    let pool = create_test_pool().await;

    let verification: i64 = sqlx::query_scalar("SELECT verification FROM members WHERE memberid = 0")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(verification, 1);
}

#[tokio::test]
async fn test_contact_pair_is_unique_regardless_of_order() {
    let pool = create_test_pool().await;
    sqlx::query(
        "INSERT INTO members (memberid, firstname, lastname, nickname, email)
         VALUES (10, 'A', 'A', 'a', 'a@x.io'), (20, 'B', 'B', 'b', 'b@x.io')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO contacts (memberid_a, memberid_b) VALUES (10, 20)")
        .execute(&pool)
        .await
        .unwrap();
    let reversed = sqlx::query("INSERT INTO contacts (memberid_a, memberid_b) VALUES (20, 10)")
        .execute(&pool)
        .await;
    assert!(reversed.is_err());
}

#[tokio::test]
async fn test_nickname_unique_ignoring_case() {
    let pool = create_test_pool().await;
    sqlx::query("INSERT INTO members (firstname, lastname, nickname, email) VALUES ('B', 'B', 'bob', 'b@x.io')")
        .execute(&pool)
        .await
        .unwrap();
    let duplicate =
        sqlx::query("INSERT INTO members (firstname, lastname, nickname, email) VALUES ('B', 'B', 'BOB', 'c@x.io')")
            .execute(&pool)
            .await;
    assert!(duplicate.is_err());
}
