//! Request DTOs for Web API.
//!
//! Required string fields default to empty so a missing field reports the
//! same message as a blank one.

use serde::Deserialize;
use validator::Validate;

use super::validation::{post_title, present};
use crate::db::{NewCategory, NewPost, PostQuery, PostUpdate, SortOrder};

/// Register request. Field presence is checked by the session manager.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Create or replace a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[serde(default)]
    #[validate(
        custom(function = "present", message = "Category name is required"),
        length(max = 100, message = "Category name must be 100 characters or less")
    )]
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryRequest> for NewCategory {
    fn from(req: CategoryRequest) -> Self {
        NewCategory {
            name: req.name,
            description: req.description,
        }
    }
}

/// Create a post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "Category ID is required"))]
    pub category_id: i64,
    #[serde(default)]
    #[validate(
        custom(function = "post_title"),
        length(max = 200, message = "Title must be 200 characters or less")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(
        custom(function = "present", message = "Author is required"),
        length(max = 100, message = "Author must be 100 characters or less")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(custom(function = "present", message = "Content is required"))]
    pub content: String,
    pub image: Option<String>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        let post = NewPost::new(req.category_id, req.title, req.author, req.content);
        match req.image {
            Some(image) => post.with_image(image),
            None => post,
        }
    }
}

/// Update a post. Only the title is required.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[serde(default)]
    #[validate(
        custom(function = "post_title"),
        length(max = 200, message = "Title must be 200 characters or less")
    )]
    pub title: String,
    #[validate(range(min = 1, message = "Category ID must be positive"))]
    pub category_id: Option<i64>,
    #[validate(length(max = 100, message = "Author must be 100 characters or less"))]
    pub author: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

impl From<UpdatePostRequest> for PostUpdate {
    fn from(req: UpdatePostRequest) -> Self {
        let mut update = PostUpdate::new(req.title);
        update.category_id = req.category_id;
        update.author = req.author;
        update.content = req.content;
        update.image = req.image;
        update
    }
}

/// Query string for listing posts.
#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub category_id: Option<i64>,
    pub sort: Option<SortOrder>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<PostListQuery> for PostQuery {
    fn from(q: PostListQuery) -> Self {
        PostQuery {
            category_id: q.category_id,
            sort: q.sort,
            limit: q.limit,
            offset: q.offset,
        }
    }
}
