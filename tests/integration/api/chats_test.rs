//! Chat API integration tests

use axum::http::StatusCode;
use pocketchat::shared::messaging::{
    ChatEmailsResponse, ChatListResponse, ChatMembersResponse, CreateChatResponse,
};
use pocketchat::shared::PushPayload;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    assert_rejected, assert_success, chat_member_ids, create_unverified_member, AsMember, TestApp,
    TestMember,
};

async fn create_chat(app: &TestApp, creator: &TestMember, name: &str, members: &[i64]) -> i64 {
    let response = app
        .server
        .post("/chats")
        .as_member(creator)
        .json(&json!({"name": name, "memberIds": members, "firstMessage": "hello"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "body: {}", response.text());
    let created: CreateChatResponse = response.json();
    assert!(created.success);
    assert_eq!(created.chat_name, name);
    created.chat_id
}

#[tokio::test]
async fn test_create_chat_response_shape() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;

    let response = app
        .server
        .post("/chats")
        .as_member(&alice)
        .json(&json!({"name": "Team", "memberIds": [], "firstMessage": "hi"}))
        .await;

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["chatName"], "Team");
    assert!(body["chatID"].is_i64());
}

#[tokio::test]
async fn test_create_chat_fans_out_first_message() {
    let mut app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let ghost = create_unverified_member(&app.pool, "ghost").await;

    let chat_id = create_chat(&app, &alice, "Pair", &[bob.id, ghost.id, 4242]).await;

    assert_eq!(chat_member_ids(&app.pool, chat_id).await, vec![alice.id, bob.id]);
    let notifications = app.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].recipients, vec![alice.id, bob.id]);
    match &notifications[0].payload {
        PushPayload::Message { message, chatid } => {
            assert_eq!(*chatid, chat_id);
            assert_eq!(message.message, "hello");
            assert_eq!(message.nickname, "alice");
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[tokio::test]
async fn test_create_chat_missing_fields() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;

    for body in [
        json!({"memberIds": [], "firstMessage": "hi"}),
        json!({"name": "Team", "firstMessage": "hi"}),
        json!({"name": "Team", "memberIds": []}),
        json!({"name": "", "memberIds": [], "firstMessage": "hi"}),
    ] {
        let response = app.server.post("/chats").as_member(&alice).json(&body).await;
        assert_rejected(&response, StatusCode::BAD_REQUEST, "Missing required information");
    }
}

#[tokio::test]
async fn test_add_members() {
    let mut app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let carol = app.member("carol").await;
    let chat_id = create_chat(&app, &alice, "Team", &[]).await;
    app.take_notifications();

    for _ in 0..2 {
        let response = app
            .server
            .put("/chats")
            .as_member(&alice)
            .json(&json!({
                "chatId": chat_id.to_string(),
                "memberIds": [bob.id, carol.id.to_string()],
                "message": "welcome",
            }))
            .await;
        assert_success(&response);
    }

    assert_eq!(
        chat_member_ids(&app.pool, chat_id).await,
        vec![alice.id, bob.id, carol.id]
    );
    let notifications = app.take_notifications();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[1].recipients, vec![alice.id, bob.id, carol.id]);
}

#[tokio::test]
async fn test_add_members_rejections() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;

    let cases = [
        (
            json!({"memberIds": [], "message": "hi"}),
            StatusCode::BAD_REQUEST,
            "Missing required information",
        ),
        (
            json!({"chatId": "x", "memberIds": [], "message": "hi"}),
            StatusCode::BAD_REQUEST,
            "Malformed parameter. chatId must be a number",
        ),
        (
            json!({"chatId": 999, "memberIds": [], "message": "hi"}),
            StatusCode::NOT_FOUND,
            "Chat ID not found",
        ),
    ];

    for (body, status, message) in cases {
        let response = app.server.put("/chats").as_member(&alice).json(&body).await;
        assert_rejected(&response, status, message);
    }
}

#[tokio::test]
async fn test_join_chat() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let chat_id = create_chat(&app, &alice, "Open", &[]).await;
    let path = format!("/chats/{chat_id}");

    assert_success(&app.server.put(&path).as_member(&bob).await);
    assert_rejected(
        &app.server.put(&path).as_member(&bob).await,
        StatusCode::BAD_REQUEST,
        "user already joined",
    );
    assert_rejected(
        &app.server.put("/chats/999").as_member(&bob).await,
        StatusCode::NOT_FOUND,
        "Chat ID not found",
    );
}

#[tokio::test]
async fn test_remove_member() {
    let mut app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let carol = app.member("carol").await;
    let chat_id = create_chat(&app, &alice, "Pair", &[bob.id]).await;
    app.take_notifications();

    assert_rejected(
        &app.server
            .delete(&format!("/chats/999/{}", bob.email))
            .as_member(&alice)
            .await,
        StatusCode::NOT_FOUND,
        "Chat ID not found",
    );
    assert_rejected(
        &app.server
            .delete(&format!("/chats/{chat_id}/nobody@example.com"))
            .as_member(&alice)
            .await,
        StatusCode::NOT_FOUND,
        "email not found",
    );
    assert_rejected(
        &app.server
            .delete(&format!("/chats/{chat_id}/{}", carol.email))
            .as_member(&alice)
            .await,
        StatusCode::BAD_REQUEST,
        "user not in chat",
    );
    assert_eq!(chat_member_ids(&app.pool, chat_id).await, vec![alice.id, bob.id]);

    let response = app
        .server
        .delete(&format!("/chats/{chat_id}/{}", bob.email))
        .as_member(&alice)
        .await;
    assert_success(&response);
    assert_eq!(chat_member_ids(&app.pool, chat_id).await, vec![alice.id]);

    let notifications = app.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].payload,
        PushPayload::ChatMemberRemoved {
            chatid: chat_id,
            memberid: bob.id
        }
    );
}

#[tokio::test]
async fn test_member_projections() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let chat_id = create_chat(&app, &alice, "Pair", &[bob.id]).await;

    let emails: ChatEmailsResponse = app
        .server
        .get(&format!("/chats/{chat_id}"))
        .as_member(&alice)
        .await
        .json();
    assert_eq!(emails.row_count, 2);
    let listed: Vec<_> = emails.rows.iter().map(|row| row.email.as_str()).collect();
    assert_eq!(listed, vec!["alice@example.com", "bob@example.com"]);

    let members: ChatMembersResponse = app
        .server
        .get(&format!("/chat_members/{chat_id}"))
        .as_member(&alice)
        .await
        .json();
    assert!(members.success);
    assert_eq!(members.chat_members_list.len(), 1);
    assert_eq!(members.chat_members_list[0].memberid, bob.id);
    assert_eq!(members.chat_members_list[0].email, "bob@example.com");

    let response = app.server.get("/chats/999").as_member(&alice).await;
    assert_rejected(&response, StatusCode::NOT_FOUND, "Chat ID not found");
}

#[tokio::test]
async fn test_chat_list_newest_first() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let first = create_chat(&app, &alice, "First", &[bob.id]).await;
    let second = create_chat(&app, &alice, "Second", &[]).await;

    let list: ChatListResponse = app.server.get("/chats").as_member(&alice).await.json();
    let ids: Vec<_> = list.data.iter().map(|chat| chat.chatid).collect();
    assert_eq!(ids, vec![second, first]);

    let list: ChatListResponse = app.server.get("/chats").as_member(&bob).await.json();
    assert_eq!(list.data.len(), 1);
    assert_eq!(list.data[0].chat_name, "First");
    assert_eq!(list.data[0].message, "hello");
}

#[tokio::test]
async fn test_typing() {
    let mut app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let carol = app.member("carol").await;
    let chat_id = create_chat(&app, &alice, "Pair", &[bob.id]).await;
    app.take_notifications();

    let response = app
        .server
        .post("/messages/typing")
        .as_member(&bob)
        .json(&json!({"chatId": chat_id, "isStartingToType": true}))
        .await;
    assert_success(&response);

    let notifications = app.take_notifications();
    assert_eq!(notifications[0].recipients, vec![alice.id]);
    let payload = serde_json::to_value(&notifications[0].payload).unwrap();
    assert_eq!(payload["type"], "typing");
    assert_eq!(payload["nickname"], "bob");
    assert_eq!(payload["isTyping"], true);

    let response = app
        .server
        .post("/messages/typing")
        .as_member(&carol)
        .json(&json!({"chatId": chat_id, "isStartingToType": false}))
        .await;
    assert_rejected(&response, StatusCode::BAD_REQUEST, "user not in chat");

    let response = app
        .server
        .post("/messages/typing")
        .as_member(&bob)
        .json(&json!({"isStartingToType": false}))
        .await;
    assert_rejected(&response, StatusCode::BAD_REQUEST, "Missing required information");
}

#[tokio::test]
async fn test_device_registration() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;

    let response = app
        .server
        .put("/pushy")
        .as_member(&alice)
        .json(&json!({"token": "device-1"}))
        .await;
    assert_success(&response);

    let owner: i64 = sqlx::query_scalar("SELECT memberid FROM push_tokens WHERE token = 'device-1'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(owner, alice.id);

    let response = app.server.put("/pushy").as_member(&alice).json(&json!({})).await;
    assert_rejected(&response, StatusCode::BAD_REQUEST, "Missing required information");

    assert_success(&app.server.delete("/pushy").as_member(&alice).await);
    let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM push_tokens")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(left, 0);
}
