//! Resource API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serial_test::serial;
use uuid::Uuid;

use crate::assert_error_response;
use crate::common::{create_test_server, create_unique_test_user, generate_test_token, TestDatabase};

#[tokio::test]
async fn test_writes_require_auth_even_without_database() {
    let server = create_test_server(None);

    let response = server
        .post("/api/resources")
        .json(&serde_json::json!({ "title": "Tokio tutorial" }))
        .await;
    assert_error_response!(response, StatusCode::UNAUTHORIZED);

    let response = server
        .delete(&format!("/api/resources/{}", Uuid::new_v4()))
        .await;
    assert_error_response!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reads_without_database_are_unavailable() {
    let server = create_test_server(None);

    assert_error_response!(
        server.get("/api/resources").await,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_invalid_resource_rejected() {
    let server = create_test_server(None);
    let token = generate_test_token(Uuid::new_v4(), "ghost@example.com");

    let response = server
        .post("/api/resources")
        .authorization_bearer(token)
        .json(&serde_json::json!({ "title": "", "link": "ftp://nope" }))
        .await;

    assert_error_response!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_resource_lifecycle() {
    let db = TestDatabase::new().await;
    let server = create_test_server(Some(db.pool().clone()));
    let owner = create_unique_test_user(db.pool()).await.unwrap();
    let other = create_unique_test_user(db.pool()).await.unwrap();

    let created = server
        .post("/api/resources")
        .authorization_bearer(&owner.token)
        .json(&serde_json::json!({
            "title": "Tokio tutorial",
            "body": "Start with the mini-redis chapter",
            "link": "https://tokio.rs/tokio/tutorial"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let created: serde_json::Value = created.json();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["likes"], 0);
    assert_eq!(created["owner_id"], owner.id.to_string());

    let listed: Vec<serde_json::Value> = server.get("/api/resources").await.json();
    assert_eq!(listed.len(), 1);

    // Only the owner may edit or delete
    let forbidden = server
        .put(&format!("/api/resources/{id}"))
        .authorization_bearer(&other.token)
        .json(&serde_json::json!({ "title": "Mine now" }))
        .await;
    assert_error_response!(forbidden, StatusCode::FORBIDDEN);

    let updated = server
        .put(&format!("/api/resources/{id}"))
        .authorization_bearer(&owner.token)
        .json(&serde_json::json!({ "title": "Tokio tutorial (2025)" }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let updated: serde_json::Value = updated.json();
    assert_eq!(updated["title"], "Tokio tutorial (2025)");
    assert_eq!(updated["body"], "Start with the mini-redis chapter");

    for expected in 1..=2 {
        let liked: serde_json::Value = server
            .post(&format!("/api/resources/{id}/like"))
            .await
            .json();
        assert_eq!(liked["likes"], expected);
    }

    let forbidden = server
        .delete(&format!("/api/resources/{id}"))
        .authorization_bearer(&other.token)
        .await;
    assert_error_response!(forbidden, StatusCode::FORBIDDEN);

    let deleted = server
        .delete(&format!("/api/resources/{id}"))
        .authorization_bearer(&owner.token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let gone = server.get(&format!("/api/resources/{id}")).await;
    assert_error_response!(gone, StatusCode::NOT_FOUND);

    let like_missing = server.post(&format!("/api/resources/{id}/like")).await;
    assert_error_response!(like_missing, StatusCode::NOT_FOUND);
}
