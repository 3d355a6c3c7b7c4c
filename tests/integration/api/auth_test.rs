//! Authentication and profile API integration tests
//!
//! Tests marked `#[ignore]` need PostgreSQL (see `common::database`).

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serial_test::serial;
use uuid::Uuid;

use crate::assert_error_response;
use crate::common::{create_test_server, create_test_user, generate_test_token, TestDatabase};

#[tokio::test]
async fn test_register_without_database_is_unavailable() {
    let server = create_test_server(None);

    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "email": "dev@example.com",
            "username": "dev",
            "password": "password123"
        }))
        .await;

    assert_error_response!(response, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_register_validates_before_touching_database() {
    let server = create_test_server(None);

    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "email": "not-an-email",
            "username": "dev",
            "password": "password123"
        }))
        .await;

    assert_error_response!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = create_test_server(None);

    assert_error_response!(server.get("/api/auth/me").await, StatusCode::UNAUTHORIZED);
    assert_error_response!(
        server
            .put("/api/profiles/me")
            .json(&serde_json::json!({ "bio": "hi" }))
            .await,
        StatusCode::UNAUTHORIZED
    );
    assert_error_response!(server.delete("/api/profiles/me").await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_token_is_rejected() {
    let server = create_test_server(None);

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("not.a.jwt")
        .await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_reaches_handler() {
    let server = create_test_server(None);
    let token = generate_test_token(Uuid::new_v4(), "ghost@example.com");

    // Past the middleware, the handler needs the database
    let response = server.get("/api/auth/me").authorization_bearer(token).await;
    assert_error_response!(response, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_register_login_me() {
    let db = TestDatabase::new().await;
    let server = create_test_server(Some(db.pool().clone()));

    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "email": "ana@example.com",
            "username": "ana",
            "password": "password123"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["token"].is_string());
    assert!(body["user"].get("password_hash").is_none());

    for identifier in ["ana", "ana@example.com"] {
        let response = server
            .post("/api/auth/login")
            .json(&serde_json::json!({ "username": identifier, "password": "password123" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let login: serde_json::Value = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "ana", "password": "password123" }))
        .await
        .json();
    let token = login["token"].as_str().unwrap().to_string();

    let me = server.get("/api/auth/me").authorization_bearer(token).await;
    assert_eq!(me.status_code(), StatusCode::OK);
    let me: serde_json::Value = me.json();
    assert_eq!(me["email"], "ana@example.com");
    assert_eq!(me["username"], "ana");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_duplicate_registration_conflicts() {
    let db = TestDatabase::new().await;
    let server = create_test_server(Some(db.pool().clone()));
    create_test_user(db.pool(), "ana", "ana@example.com", "password123")
        .await
        .unwrap();

    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "email": "ana@example.com",
            "username": "ana2",
            "password": "password123"
        }))
        .await;

    assert_error_response!(response, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_login_wrong_password() {
    let db = TestDatabase::new().await;
    let server = create_test_server(Some(db.pool().clone()));
    create_test_user(db.pool(), "ana", "ana@example.com", "password123")
        .await
        .unwrap();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "ana", "password": "wrong-password" }))
        .await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_profile_update_and_search() {
    let db = TestDatabase::new().await;
    let server = create_test_server(Some(db.pool().clone()));
    let user = create_test_user(db.pool(), "ana", "ana@example.com", "password123")
        .await
        .unwrap();
    create_test_user(db.pool(), "bo", "bo@example.com", "password123")
        .await
        .unwrap();

    let response = server
        .put("/api/profiles/me")
        .authorization_bearer(&user.token)
        .json(&serde_json::json!({ "skills": "rust,sql", "location": "Berlin" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let found: Vec<serde_json::Value> = server
        .get("/api/profiles")
        .add_query_param("skill", "rust")
        .await
        .json();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["username"], "ana");
    assert!(found[0].get("email").is_none());

    let profile = server.get(&format!("/api/profiles/{}", user.id)).await;
    assert_eq!(profile.status_code(), StatusCode::OK);

    let missing = server.get(&format!("/api/profiles/{}", Uuid::new_v4())).await;
    assert_error_response!(missing, StatusCode::NOT_FOUND);

    let deleted = server
        .delete("/api/profiles/me")
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
}
