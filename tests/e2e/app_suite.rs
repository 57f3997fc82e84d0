//! E2E test suite for pocketchat
//!
//! Whole user journeys driven only through the HTTP API.

use pocketchat::shared::messaging::{ChatEmailsResponse, ContactListResponse, CreateChatResponse, ListContactRequestsResponse};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_success, chat_member_ids, AsMember, TestApp};

#[tokio::test]
async fn test_request_accept_then_contacts() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let response = app
        .server
        .post("/contacts/requests")
        .as_member(&alice)
        .json(&json!({"nickname": "bob"}))
        .await;
    assert_success(&response);

    let response = app
        .server
        .put("/contacts/requests")
        .as_member(&bob)
        .json(&json!({"memberID": alice.id, "isAccepting": true}))
        .await;
    assert_success(&response);

    let contacts: ContactListResponse = app.server.get("/contacts").as_member(&alice).await.json();
    assert_eq!(contacts.data.len(), 1);
    assert_eq!(contacts.data[0].memberid, bob.id);

    for member in [&alice, &bob] {
        let lists: ListContactRequestsResponse = app
            .server
            .get("/contacts/requests")
            .as_member(member)
            .await
            .json();
        assert!(lists.received_requests.is_empty());
        assert!(lists.sent_requests.is_empty());
    }
}

#[tokio::test]
async fn test_trio_chat_then_remove_member() {
    let app = TestApp::new().await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let carol = app.member("carol").await;

    let created: CreateChatResponse = app
        .server
        .post("/chats")
        .as_member(&alice)
        .json(&json!({"name": "Trio", "memberIds": [bob.id, carol.id], "firstMessage": "hello"}))
        .await
        .json();
    let chat_id = created.chat_id;

    let emails: ChatEmailsResponse = app
        .server
        .get(&format!("/chats/{chat_id}"))
        .as_member(&alice)
        .await
        .json();
    assert_eq!(emails.row_count, 3);

    let response = app
        .server
        .delete(&format!("/chats/{chat_id}/{}", bob.email))
        .as_member(&alice)
        .await;
    assert_success(&response);

    assert_eq!(chat_member_ids(&app.pool, chat_id).await, vec![alice.id, carol.id]);
}
