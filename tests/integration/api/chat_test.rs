//! Chat and liveness API integration tests
//!
//! None of these routes touch the database, so they run without one.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::create_test_server;
use crate::{assert_contains, assert_error_response};

#[tokio::test]
async fn test_ping() {
    let server = create_test_server(None);

    let response = server.get("/api/ping").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "pong");

    let root = server.get("/").await;
    assert_eq!(root.text(), "pong");
}

#[tokio::test]
async fn test_post_chat_returns_envelope() {
    let server = create_test_server(None);

    let response = server
        .post("/api/chat")
        .json(&serde_json::json!({ "text": "standup in 5", "author": "ana" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["text"], "standup in 5");
    assert_eq!(body["author"], "ana");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_post_chat_defaults_author() {
    let server = create_test_server(None);

    let response = server
        .post("/api/chat")
        .json(&serde_json::json!({ "text": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["author"], "anonymous");
}

#[tokio::test]
async fn test_post_chat_rejects_empty_and_oversized() {
    let server = create_test_server(None);

    let empty = server
        .post("/api/chat")
        .json(&serde_json::json!({ "text": "   " }))
        .await;
    assert_error_response!(empty, StatusCode::BAD_REQUEST);

    let huge = server
        .post("/api/chat")
        .json(&serde_json::json!({ "text": "x".repeat(600) }))
        .await;
    let body = assert_error_response!(huge, StatusCode::BAD_REQUEST);
    assert_contains!(body["error"].as_str().unwrap_or_default(), "limit");
}

#[tokio::test]
async fn test_hub_stats_counts_nothing_without_clients() {
    let server = create_test_server(None);

    server
        .post("/api/chat")
        .json(&serde_json::json!({ "text": "into the void" }))
        .await;

    let response = server.get("/api/hub").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({ "members": 0, "delivered": 0, "evicted": 0 }));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = create_test_server(None);

    let response = server.get("/api/nope").expect_failure().await;
    assert_error_response!(response, StatusCode::NOT_FOUND);
}
