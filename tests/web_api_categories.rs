//! Web API Category Tests

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_category, create_post, create_test_servers};

#[tokio::test]
async fn test_create_and_get_category() {
    for (backend, server) in create_test_servers(false).await {
        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Rust", "description": "Systems programming"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created: Value = response.json();
        assert_eq!(created["name"], "Rust", "{backend}");
        assert_eq!(created["description"], "Systems programming");

        let id = created["id"].as_i64().unwrap();
        let response = server.get(&format!("/api/categories/{}", id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), created);
    }
}

#[tokio::test]
async fn test_create_category_validation() {
    for (_, server) in create_test_servers(false).await {
        let response = server
            .post("/api/categories")
            .json(&json!({"description": "no name"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Category name is required"
        );

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "x".repeat(101)}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Category name must be 100 characters or less"
        );
    }
}

#[tokio::test]
async fn test_duplicate_category_name() {
    for (backend, server) in create_test_servers(false).await {
        create_category(&server, "Rust").await;

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Rust"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Category already exists",
            "{backend}"
        );
    }
}

#[tokio::test]
async fn test_list_categories_in_creation_order() {
    for (backend, server) in create_test_servers(false).await {
        create_category(&server, "Zeta").await;
        create_category(&server, "Alpha").await;

        let body: Value = server.get("/api/categories").await.json();
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"], "{backend}");
    }
}

#[tokio::test]
async fn test_get_missing_category() {
    for (_, server) in create_test_servers(false).await {
        let response = server.get("/api/categories/999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Category not found"})
        );

        let response = server.get("/api/categories/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_update_category() {
    for (backend, server) in create_test_servers(false).await {
        let id = create_category(&server, "Old").await;

        let response = server
            .put(&format!("/api/categories/{}", id))
            .json(&json!({"name": "New", "description": "desc"}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["message"], "Category updated successfully", "{backend}");
        assert_eq!(body["category"]["name"], "New");
        assert_eq!(body["category"]["description"], "desc");

        let response = server
            .put("/api/categories/999")
            .json(&json!({"name": "Ghost"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_update_category_to_taken_name() {
    for (_, server) in create_test_servers(false).await {
        create_category(&server, "Rust").await;
        let id = create_category(&server, "Go").await;

        let response = server
            .put(&format!("/api/categories/{}", id))
            .json(&json!({"name": "Rust"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Keeping its own name is not a conflict.
        server
            .put(&format!("/api/categories/{}", id))
            .json(&json!({"name": "Go", "description": "gophers"}))
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn test_delete_category_cascades_to_posts() {
    for (backend, server) in create_test_servers(false).await {
        let doomed = create_category(&server, "Doomed").await;
        let kept = create_category(&server, "Kept").await;
        create_post(&server, doomed, "Gone Soon").await;
        create_post(&server, kept, "Survivor").await;

        let response = server.delete(&format!("/api/categories/{}", doomed)).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"message": "Category deleted successfully"})
        );

        server
            .get("/api/posts/gone-soon")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let posts: Value = server.get("/api/posts").await.json();
        assert_eq!(posts.as_array().unwrap().len(), 1, "{backend}");
        assert_eq!(posts[0]["slug"], "survivor");

        server
            .delete(&format!("/api/categories/{}", doomed))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
