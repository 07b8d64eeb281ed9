//! Post handlers for Web API.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::path_id;
use crate::db::{NewPost, Post, PostQuery, PostUpdate};
use crate::web::dto::{
    CreatePostRequest, MessageResponse, PostListQuery, PostUpdatedResponse, UpdatePostRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

fn post_not_found() -> ApiError {
    ApiError::not_found("Post not found")
}

/// POST /api/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.store.create_post(&NewPost::from(req)).await?;

    tracing::info!(post_id = post.id, slug = %post.slug, "Post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts - List posts with optional filter, sort and paging.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PostListQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::bad_request(format!("Invalid query: {}", e.body_text())))?;

    Ok(Json(state.store.list_posts(&PostQuery::from(query)).await?))
}

/// GET /api/posts/:slug - Get a post by slug.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, ApiError> {
    state
        .store
        .find_post_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(post_not_found)
}

/// PUT /api/posts/:id - Update a post.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<PostUpdatedResponse>, ApiError> {
    let id = path_id(path, "post")?;

    let post = state
        .store
        .update_post(id, &PostUpdate::from(req))
        .await?
        .ok_or_else(post_not_found)?;

    Ok(Json(PostUpdatedResponse {
        message: "Post updated successfully".to_string(),
        post,
    }))
}

/// DELETE /api/posts/:id - Delete a post.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = path_id(path, "post")?;

    if !state.store.delete_post(id).await? {
        return Err(post_not_found());
    }

    tracing::info!(post_id = id, "Post deleted");

    Ok(Json(MessageResponse::new("Post deleted successfully")))
}
