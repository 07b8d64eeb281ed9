//! Shared helpers for Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use inkpost::{Config, Database, DocumentStore, SharedStore, SqlStore, WebServer};

/// JWT secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test configuration.
pub fn create_test_config(strict_revocation: bool) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.auth.strict_revocation = strict_revocation;
    config
}

/// One empty store per backend, labelled with the backend name.
pub async fn create_stores() -> Vec<(&'static str, SharedStore)> {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    vec![
        ("document", Arc::new(DocumentStore::new()) as SharedStore),
        ("sqlite", Arc::new(SqlStore::new(db)) as SharedStore),
    ]
}

/// Create a test server over the given store.
pub fn create_test_server(store: SharedStore, strict_revocation: bool) -> TestServer {
    let config = create_test_config(strict_revocation);
    let web = WebServer::new(&config, store).expect("Failed to configure web server");

    TestServer::new(web.router()).expect("Failed to create test server")
}

/// A test server per backend.
pub async fn create_test_servers(strict_revocation: bool) -> Vec<(&'static str, TestServer)> {
    create_stores()
        .await
        .into_iter()
        .map(|(name, store)| (name, create_test_server(store, strict_revocation)))
        .collect()
}

/// Register a user.
pub async fn register_user(
    server: &TestServer,
    name: &str,
    email: &str,
    password: &str,
) -> TestResponse {
    server
        .post("/api/users/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": password
        }))
        .await
}

/// Log in.
pub async fn login_user(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/api/users/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await
}

/// Register a user and return the issued token.
pub async fn register_token(server: &TestServer, name: &str, email: &str) -> String {
    let response = register_user(server, name, email, "pw123").await;
    response.assert_status(StatusCode::CREATED);

    response.json::<Value>()["token"]
        .as_str()
        .expect("token")
        .to_string()
}

/// Fetch the profile with a bearer token.
pub async fn get_profile(server: &TestServer, token: &str) -> TestResponse {
    server
        .get("/api/users/profile")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await
}

/// Create a category and return its ID.
pub async fn create_category(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/categories")
        .json(&json!({ "name": name }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().expect("category id")
}

/// Create a post and return the response body.
pub async fn create_post(server: &TestServer, category_id: i64, title: &str) -> Value {
    let response = server
        .post("/api/posts")
        .json(&json!({
            "category_id": category_id,
            "title": title,
            "author": "alice",
            "content": format!("Body of {}", title)
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}
