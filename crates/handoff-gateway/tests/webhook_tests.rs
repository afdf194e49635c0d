// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end webhook tests driving the router without a bound socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use handoff_core::settings::{AiSettings, ChannelSettings, Settings};
use handoff_core::{AiResponder, ChannelClient, SettingsStore};
use handoff_engine::Engine;
use handoff_gateway::{GatewayState, router};
use handoff_line::signature;
use handoff_storage::Database;
use handoff_storage::queries::{conversations, events, messages};
use handoff_test_utils::{FailingSettings, MockChannel, MockResponder, StaticSettings};

const SECRET: &str = "test-channel-secret";

struct Fixture {
    app: axum::Router,
    db: Database,
    channel: Arc<MockChannel>,
    responder: Arc<MockResponder>,
    _dir: tempfile::TempDir,
}

async fn fixture_with_store(store: Arc<dyn SettingsStore>) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gateway.db");
    let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
    let channel = Arc::new(MockChannel::new());
    let responder = Arc::new(MockResponder::new());
    let engine = Arc::new(Engine::new(
        db.clone(),
        Arc::clone(&channel) as Arc<dyn ChannelClient>,
        Arc::clone(&responder) as Arc<dyn AiResponder>,
    ));
    Fixture {
        app: router(GatewayState::new(store, engine)),
        db,
        channel,
        responder,
        _dir: dir,
    }
}

async fn fixture() -> Fixture {
    let settings = Settings {
        ai: AiSettings {
            enabled: true,
            ..AiSettings::default()
        },
        channel: ChannelSettings {
            channel_secret: SECRET.to_string(),
            ..ChannelSettings::default()
        },
        ..Settings::default()
    };
    fixture_with_store(Arc::new(StaticSettings::new(settings))).await
}

fn text_event_body() -> String {
    serde_json::json!({
        "destination": "bot-1",
        "events": [{
            "type": "message",
            "webhookEventId": "evt-1",
            "replyToken": "rt-1",
            "source": { "type": "user", "userId": "U1" },
            "message": { "type": "text", "id": "m-1", "text": "what are your hours?" },
        }],
    })
    .to_string()
}

fn signed_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-signature", signature::sign(SECRET, body.as_bytes()))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_webhook_is_method_not_allowed() {
    let f = fixture().await;
    let response = f
        .app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/webhook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn missing_signature_is_unauthorized() {
    let f = fixture().await;
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .body(Body::from(text_event_body()))
        .unwrap();
    let response = f.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(f.channel.replies().await.is_empty());
}

#[tokio::test]
async fn tampered_body_is_unauthorized() {
    let f = fixture().await;
    let body = text_event_body();
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-signature", signature::sign(SECRET, b"different body"))
        .body(Body::from(body))
        .unwrap();
    let response = f.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signed_but_unparseable_body_is_bad_request() {
    let f = fixture().await;
    let response = f
        .app
        .oneshot(signed_request("this is not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn settings_fetch_failure_is_batch_fatal() {
    let f = fixture_with_store(Arc::new(FailingSettings)).await;
    let response = f
        .app
        .oneshot(signed_request(&text_event_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(f.channel.replies().await.is_empty());
}

#[tokio::test]
async fn valid_event_gets_exactly_one_model_reply() {
    let f = fixture().await;
    f.responder.add_reply("we are open 9 to 5").await;

    let response = f
        .app
        .clone()
        .oneshot(signed_request(&text_event_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");

    let replies = f.channel.replies().await;
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].target, "rt-1");
    assert_eq!(replies[0].text, "we are open 9 to 5");

    // Exactly one dedup row, no conversation-state mutation.
    let now = chrono::Utc::now();
    assert_eq!(
        events::admit(&f.db, "evt-1", now).await.unwrap(),
        handoff_core::AdmitOutcome::Duplicate
    );
    let state = conversations::get_conversation(&f.db, "U1").await.unwrap();
    assert!(!state.human_mode);
    assert!(state.last_human_at.is_none());

    // A redelivery of the same batch is answered 200 but sends nothing.
    let redelivery = f
        .app
        .oneshot(signed_request(&text_event_body()))
        .await
        .unwrap();
    assert_eq!(redelivery.status(), StatusCode::OK);
    assert_eq!(f.channel.replies().await.len(), 1);
    assert_eq!(messages::recent_messages(&f.db, "U1", 10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn ignorable_events_do_not_abort_the_batch() {
    let f = fixture().await;
    f.responder.add_reply("hello there").await;

    let body = serde_json::json!({
        "events": [
            { "type": "follow", "source": { "type": "user", "userId": "U9" } },
            {
                "type": "message",
                "webhookEventId": "evt-2",
                "replyToken": "rt-2",
                "source": { "type": "user", "userId": "U1" },
                "message": { "type": "text", "id": "m-2", "text": "hi" },
            },
        ],
    })
    .to_string();

    let response = f.app.oneshot(signed_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(f.channel.replies().await.len(), 1);
}

#[tokio::test]
async fn health_is_unauthenticated() {
    let f = fixture().await;
    let response = f
        .app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("\"status\":\"ok\""));
}
