//! API integration tests that run without a database
//!
//! These tests exercise the router end to end: route wiring, the fallback
//! handler, the auth extractor, and the 503 behavior of database-backed
//! endpoints when no pool is configured.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::auth_helpers::bearer_for;
use snapfeed::backend::server::init::create_app;
use uuid::Uuid;

/// Build a test server with the database disabled and media in a tempdir
async fn create_test_server() -> (TestServer, tempfile::TempDir) {
    let media_dir = tempfile::tempdir().expect("Failed to create temp media dir");
    std::env::remove_var("DATABASE_URL");
    std::env::set_var("MEDIA_DIR", media_dir.path());

    let app = create_app().await;
    (TestServer::new(app).unwrap(), media_dir)
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_404() {
    let (server, _media) = create_test_server().await;

    let response = server.get("/api/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_without_database_is_503() {
    let (server, _media) = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_login_without_database_is_503() {
    let (server, _media) = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_update_profile_requires_token() {
    let (server, _media) = create_test_server().await;

    let response = server
        .put(&format!("/api/users/{}", Uuid::new_v4()))
        .json(&serde_json::json!({ "bio": "hi" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_requires_token() {
    let (server, _media) = create_test_server().await;

    let response = server
        .post("/api/posts")
        .json(&serde_json::json!({ "description": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_follow_rejects_garbage_token() {
    let (server, _media) = create_test_server().await;

    let response = server
        .put(&format!("/api/users/{}/follow", Uuid::new_v4()))
        .add_header("Authorization", "Bearer not.a.token")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_with_token_but_no_multipart_is_400() {
    let (server, _media) = create_test_server().await;

    let response = server
        .post("/api/upload")
        .add_header("Authorization", bearer_for(Uuid::new_v4(), "alice"))
        .await;

    // The auth extractor passes; the multipart extractor rejects the body
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_websocket_route_is_wired() {
    let (server, _media) = create_test_server().await;

    // A plain GET without upgrade headers must not 404 (the route exists);
    // the upgrade extractor rejects it instead
    let response = server.get("/ws").await;
    assert_ne!(response.status_code(), StatusCode::NOT_FOUND);
}
