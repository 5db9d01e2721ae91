//! Integration tests for conversations and messaging.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, register_user};
use serde_json::json;

async fn open_conversation(app: &axum::Router, a: i64, b: i64) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/conversations",
        json!({ "participants": [a, b] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn send_message(app: &axum::Router, conversation_id: i64, sender_id: i64, text: &str) {
    let response = post_json(
        app,
        "/api/v1/messages",
        json!({
            "conversation_id": conversation_id,
            "sender_id": sender_id,
            "text": text,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Test: Listing requires the user_id parameter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_conversations_without_user_id_is_a_bad_request() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/conversations").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: A thread end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn a_thread_lists_messages_oldest_first() {
    let app = common::build_test_app();
    let alice = register_user(&app, "alice").await["id"].as_i64().unwrap();
    let bob = register_user(&app, "bob").await["id"].as_i64().unwrap();
    let conversation = open_conversation(&app, alice, bob).await;
    let conversation_id = conversation["id"].as_i64().unwrap();

    send_message(&app, conversation_id, alice, "hello").await;
    send_message(&app, conversation_id, bob, "hi there").await;
    send_message(&app, conversation_id, alice, "found your ID?").await;

    let response = get(&app, &format!("/api/v1/conversations/{conversation_id}/messages")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let thread = body_json(response).await;
    let texts: Vec<&str> = thread
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["hello", "hi there", "found your ID?"]);
}

#[tokio::test]
async fn conversation_lists_carry_the_latest_message() {
    let app = common::build_test_app();
    let alice = register_user(&app, "alice").await["id"].as_i64().unwrap();
    let bob = register_user(&app, "bob").await["id"].as_i64().unwrap();
    let carol = register_user(&app, "carol").await["id"].as_i64().unwrap();

    let ab = open_conversation(&app, alice, bob).await;
    open_conversation(&app, bob, carol).await;

    send_message(&app, ab["id"].as_i64().unwrap(), alice, "hello").await;
    send_message(&app, ab["id"].as_i64().unwrap(), bob, "latest").await;

    let for_alice = body_json(get(&app, &format!("/api/v1/conversations?user_id={alice}")).await).await;
    let list = for_alice.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["last_message"]["text"], "latest");

    let for_bob = body_json(get(&app, &format!("/api/v1/conversations?user_id={bob}")).await).await;
    assert_eq!(for_bob.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: Error cases
// ---------------------------------------------------------------------------

#[tokio::test]
async fn messaging_an_unknown_conversation_returns_404() {
    let app = common::build_test_app();
    let alice = register_user(&app, "alice").await["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        "/api/v1/messages",
        json!({ "conversation_id": 9999, "sender_id": alice, "text": "void" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn a_single_participant_conversation_is_rejected() {
    let app = common::build_test_app();
    let alice = register_user(&app, "alice").await["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        "/api/v1/conversations",
        json!({ "participants": [alice] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
