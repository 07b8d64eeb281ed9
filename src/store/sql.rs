//! Relational store backed by SQLite.

use async_trait::async_trait;

use super::{BlogStore, CategoryStore, PostStore, UserStore};
use crate::db::{
    Category, CategoryRepository, Database, NewCategory, NewPost, NewUser, Post, PostQuery,
    PostRepository, PostUpdate, User, UserRepository,
};
use crate::Result;

/// [`BlogStore`] over a SQLite [`Database`].
#[derive(Debug, Clone)]
pub struct SqlStore {
    db: Database,
}

impl SqlStore {
    /// Wrap an opened and migrated database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl UserStore for SqlStore {
    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        UserRepository::new(self.db.pool()).create(new_user).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        UserRepository::new(self.db.pool()).get_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        UserRepository::new(self.db.pool()).get_by_email(email).await
    }

    async fn set_user_token(&self, id: i64, token: Option<&str>) -> Result<bool> {
        UserRepository::new(self.db.pool()).set_token(id, token).await
    }
}

#[async_trait]
impl CategoryStore for SqlStore {
    async fn create_category(&self, new_category: &NewCategory) -> Result<Category> {
        CategoryRepository::new(self.db.pool())
            .create(new_category)
            .await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        CategoryRepository::new(self.db.pool()).list().await
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        CategoryRepository::new(self.db.pool()).get_by_id(id).await
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        CategoryRepository::new(self.db.pool())
            .get_by_name(name)
            .await
    }

    async fn update_category(&self, id: i64, update: &NewCategory) -> Result<Option<Category>> {
        CategoryRepository::new(self.db.pool())
            .update(id, update)
            .await
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        CategoryRepository::new(self.db.pool()).delete(id).await
    }
}

#[async_trait]
impl PostStore for SqlStore {
    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        PostRepository::new(self.db.pool()).create(new_post).await
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        PostRepository::new(self.db.pool()).list(query).await
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>> {
        PostRepository::new(self.db.pool()).get_by_id(id).await
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        PostRepository::new(self.db.pool()).get_by_slug(slug).await
    }

    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        PostRepository::new(self.db.pool()).update(id, update).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool> {
        PostRepository::new(self.db.pool()).delete(id).await
    }
}

impl BlogStore for SqlStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
