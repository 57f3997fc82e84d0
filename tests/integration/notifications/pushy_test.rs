//! Pushy gateway and dispatcher tests against a mock Pushy API

use pocketchat::backend::notifications::dispatcher::deliver;
use pocketchat::backend::notifications::tokens::register_token;
use pocketchat::backend::notifications::{
    spawn_dispatcher, DeliveryReport, Notification, Notifier, PushGateway, PushyGateway,
};
use pocketchat::shared::PushPayload;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{create_test_member, create_test_pool};

fn gateway_for(server: &MockServer) -> PushyGateway {
    PushyGateway::new(format!("{}/push", server.uri()), "secret-key")
}

#[tokio::test]
async fn test_pushy_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/push"))
        .and(query_param("api_key", "secret-key"))
        .and(body_partial_json(json!({
            "to": "device-1",
            "data": {"type": "newContactRequest", "toId": "20", "fromId": "10"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let payload = PushPayload::new_contact_request(20, 10, "alice");

    gateway.send("device-1", &payload).await.unwrap();
}

#[tokio::test]
async fn test_pushy_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .send("device-1", &PushPayload::typing(1, 2, "bob", true))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("401"), "{err}");
}

#[tokio::test]
async fn test_deliver_reaches_every_device_of_recipients() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/push"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let pool = create_test_pool().await;
    let alice = create_test_member(&pool, "alice").await;
    let bob = create_test_member(&pool, "bob").await;
    let carol = create_test_member(&pool, "carol").await;
    {
        let mut conn = pool.acquire().await.unwrap();
        register_token(&mut conn, alice.id, "alice-phone").await.unwrap();
        register_token(&mut conn, alice.id, "alice-tablet").await.unwrap();
        register_token(&mut conn, bob.id, "bob-phone").await.unwrap();
        register_token(&mut conn, carol.id, "carol-phone").await.unwrap();
    }

    let notification = Notification {
        recipients: vec![alice.id, bob.id],
        payload: PushPayload::contact_deleted(bob.id, alice.id, "alice"),
    };
    let report = deliver(&pool, &gateway_for(&server), &notification).await.unwrap();

    assert_eq!(report, DeliveryReport { delivered: 3, failed: 0 });
}

#[tokio::test]
async fn test_dispatcher_survives_gateway_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let pool = create_test_pool().await;
    let alice = create_test_member(&pool, "alice").await;
    {
        let mut conn = pool.acquire().await.unwrap();
        register_token(&mut conn, alice.id, "alice-phone").await.unwrap();
    }

    let (notifier, receiver) = Notifier::channel();
    let handle = spawn_dispatcher(pool.clone(), gateway_for(&server), receiver);

    notifier.notify([alice.id], PushPayload::typing(1, 2, "bob", true));
    notifier.notify([alice.id], PushPayload::typing(1, 2, "bob", false));
    drop(notifier);

    // The loop ends once the queue is closed and drained.
    handle.await.unwrap();
}
