//! Storage abstraction for inkpost.
//!
//! Users, categories and posts live behind the [`BlogStore`] trait, which
//! has two implementations:
//! - [`SqlStore`]: the relational store (SQLite through sqlx)
//! - [`DocumentStore`]: in-process document collections
//!
//! Which one backs a running server is chosen by `database.backend`.

mod document;
mod sql;

pub use document::DocumentStore;
pub use sql::SqlStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::db::{
    Category, Database, NewCategory, NewPost, NewUser, Post, PostQuery, PostUpdate, User,
};
use crate::Result;

/// Credential store operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `DuplicateUser` if the email is taken.
    async fn create_user(&self, new_user: &NewUser) -> Result<User>;

    /// Find a user by ID.
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Find a user by exact email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Set or clear the stored session token. Returns false if the user is gone.
    async fn set_user_token(&self, id: i64, token: Option<&str>) -> Result<bool>;
}

/// Category collection operations.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Insert a category. Fails with `Conflict` if the name is taken.
    async fn create_category(&self, new_category: &NewCategory) -> Result<Category>;

    /// List all categories in creation order.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Find a category by ID.
    async fn find_category(&self, id: i64) -> Result<Option<Category>>;

    /// Find a category by exact name.
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Replace name and description. Returns None if not found.
    async fn update_category(&self, id: i64, update: &NewCategory) -> Result<Option<Category>>;

    /// Delete a category and its posts. Returns false if not found.
    async fn delete_category(&self, id: i64) -> Result<bool>;
}

/// Post collection operations.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post. Fails with `NotFound` for an unknown category and
    /// `Conflict` for a taken slug.
    async fn create_post(&self, new_post: &NewPost) -> Result<Post>;

    /// List posts.
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>>;

    /// Find a post by ID.
    async fn find_post(&self, id: i64) -> Result<Option<Post>>;

    /// Find a post by slug.
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// Update a post. Returns None if not found.
    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>>;

    /// Delete a post. Returns false if not found.
    async fn delete_post(&self, id: i64) -> Result<bool>;
}

/// Everything the API needs from a persistence layer.
pub trait BlogStore: UserStore + CategoryStore + PostStore {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Shared handle to the configured store.
pub type SharedStore = Arc<dyn BlogStore>;

/// Build the store selected by the configuration.
///
/// For the relational backend this connects and migrates; an error here is
/// fatal at startup.
pub async fn open_store(config: &DatabaseConfig) -> Result<SharedStore> {
    match config.backend {
        StoreBackend::Sqlite => {
            let db = Database::open(&config.url).await?;
            Ok(Arc::new(SqlStore::new(db)))
        }
        StoreBackend::Document => Ok(Arc::new(DocumentStore::new())),
    }
}
