//! Category handlers for Web API.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::path_id;
use crate::db::{Category, NewCategory};
use crate::web::dto::{CategoryRequest, CategoryUpdatedResponse, MessageResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

fn category_not_found() -> ApiError {
    ApiError::not_found("Category not found")
}

/// POST /api/categories - Create a category.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .store
        .create_category(&NewCategory::from(req))
        .await?;

    tracing::info!(category_id = category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/categories - List all categories.
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.store.list_categories().await?))
}

/// GET /api/categories/:id - Get a category.
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Category>, ApiError> {
    let id = path_id(path, "category")?;

    state
        .store
        .find_category(id)
        .await?
        .map(Json)
        .ok_or_else(category_not_found)
}

/// PUT /api/categories/:id - Replace a category's name and description.
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<Json<CategoryUpdatedResponse>, ApiError> {
    let id = path_id(path, "category")?;

    let category = state
        .store
        .update_category(id, &NewCategory::from(req))
        .await?
        .ok_or_else(category_not_found)?;

    Ok(Json(CategoryUpdatedResponse {
        message: "Category updated successfully".to_string(),
        category,
    }))
}

/// DELETE /api/categories/:id - Delete a category and its posts.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = path_id(path, "category")?;

    if !state.store.delete_category(id).await? {
        return Err(category_not_found());
    }

    tracing::info!(category_id = id, "Category deleted");

    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
