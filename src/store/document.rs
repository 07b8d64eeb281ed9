//! Document-style store kept in process memory.
//!
//! Each entity kind is a collection keyed by ID. All collections sit behind
//! one `RwLock`, so a check-then-insert runs under a single write guard and
//! the email/name/slug uniqueness rules cannot race.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{BlogStore, CategoryStore, PostStore, UserStore};
use crate::db::{
    Category, NewCategory, NewPost, NewUser, Post, PostQuery, PostUpdate, SortOrder, User,
};
use crate::{BlogError, Result};

/// Post document. The category name is joined at read time.
#[derive(Debug, Clone)]
struct PostDocument {
    id: i64,
    category_id: i64,
    title: String,
    slug: String,
    author: String,
    content: String,
    image: Option<String>,
    created_at: String,
}

#[derive(Debug, Default)]
struct Collections {
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    posts: BTreeMap<i64, PostDocument>,
    last_user_id: i64,
    last_category_id: i64,
    last_post_id: i64,
}

impl Collections {
    fn join(&self, doc: &PostDocument) -> Post {
        let category_name = self
            .categories
            .get(&doc.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        Post {
            id: doc.id,
            category_id: doc.category_id,
            category_name,
            title: doc.title.clone(),
            slug: doc.slug.clone(),
            author: doc.author.clone(),
            content: doc.content.clone(),
            image: doc.image.clone(),
            created_at: doc.created_at.clone(),
        }
    }

    fn slug_taken(&self, slug: &str, except_id: Option<i64>) -> bool {
        self.posts
            .values()
            .any(|p| p.slug == slug && Some(p.id) != except_id)
    }

    fn category_name_taken(&self, name: &str, except_id: Option<i64>) -> bool {
        self.categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except_id)
    }
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn slug_conflict() -> BlogError {
    BlogError::Conflict("A post with this slug already exists".to_string())
}

fn category_conflict() -> BlogError {
    BlogError::Conflict("Category already exists".to_string())
}

/// [`BlogStore`] over in-memory document collections.
#[derive(Debug, Default)]
pub struct DocumentStore {
    inner: RwLock<Collections>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for DocumentStore {
    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == new_user.email) {
            return Err(BlogError::DuplicateUser);
        }

        inner.last_user_id += 1;
        let user = User {
            id: inner.last_user_id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            role: new_user.role,
            token: None,
            created_at: now(),
        };
        inner.users.insert(user.id, user.clone());
        debug!(user_id = user.id, "Inserted user document");

        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn set_user_token(&self, id: i64, token: Option<&str>) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id) {
            Some(user) => {
                user.token = token.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CategoryStore for DocumentStore {
    async fn create_category(&self, new_category: &NewCategory) -> Result<Category> {
        let mut inner = self.inner.write().await;

        if inner.category_name_taken(&new_category.name, None) {
            return Err(category_conflict());
        }

        inner.last_category_id += 1;
        let category = Category {
            id: inner.last_category_id,
            name: new_category.name.clone(),
            description: new_category.description.clone(),
            created_at: now(),
        };
        inner.categories.insert(category.id, category.clone());

        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.inner.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        Ok(self.inner.read().await.categories.get(&id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let inner = self.inner.read().await;
        Ok(inner.categories.values().find(|c| c.name == name).cloned())
    }

    async fn update_category(&self, id: i64, update: &NewCategory) -> Result<Option<Category>> {
        let mut inner = self.inner.write().await;

        if !inner.categories.contains_key(&id) {
            return Ok(None);
        }
        if inner.category_name_taken(&update.name, Some(id)) {
            return Err(category_conflict());
        }

        let category = inner.categories.get_mut(&id).map(|category| {
            category.name = update.name.clone();
            category.description = update.description.clone();
            category.clone()
        });
        Ok(category)
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;

        if inner.categories.remove(&id).is_none() {
            return Ok(false);
        }
        inner.posts.retain(|_, post| post.category_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PostStore for DocumentStore {
    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        let mut inner = self.inner.write().await;

        if !inner.categories.contains_key(&new_post.category_id) {
            return Err(BlogError::NotFound("Category".to_string()));
        }
        if inner.slug_taken(&new_post.slug, None) {
            return Err(slug_conflict());
        }

        inner.last_post_id += 1;
        let doc = PostDocument {
            id: inner.last_post_id,
            category_id: new_post.category_id,
            title: new_post.title.clone(),
            slug: new_post.slug.clone(),
            author: new_post.author.clone(),
            content: new_post.content.clone(),
            image: new_post.image.clone(),
            created_at: now(),
        };
        let post = inner.join(&doc);
        inner.posts.insert(doc.id, doc);

        Ok(post)
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let inner = self.inner.read().await;

        let mut docs: Vec<&PostDocument> = inner
            .posts
            .values()
            .filter(|p| query.category_id.map_or(true, |id| p.category_id == id))
            .collect();

        match query.sort {
            Some(SortOrder::Asc) => {
                docs.sort_by(|a, b| (&a.created_at, a.id).cmp(&(&b.created_at, b.id)))
            }
            Some(SortOrder::Desc) => {
                docs.sort_by(|a, b| (&b.created_at, b.id).cmp(&(&a.created_at, a.id)))
            }
            None => {}
        }

        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map_or(usize::MAX, |l| l as usize);

        Ok(docs
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|doc| inner.join(doc))
            .collect())
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).map(|doc| inner.join(doc)))
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .find(|p| p.slug == slug)
            .map(|doc| inner.join(doc)))
    }

    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        let mut inner = self.inner.write().await;

        if !inner.posts.contains_key(&id) {
            return Ok(None);
        }
        if let Some(category_id) = update.category_id {
            if !inner.categories.contains_key(&category_id) {
                return Err(BlogError::NotFound("Category".to_string()));
            }
        }
        if inner.slug_taken(&update.slug, Some(id)) {
            return Err(slug_conflict());
        }

        let Some(doc) = inner.posts.get_mut(&id) else {
            return Ok(None);
        };
        doc.title = update.title.clone();
        doc.slug = update.slug.clone();
        if let Some(category_id) = update.category_id {
            doc.category_id = category_id;
        }
        if let Some(ref author) = update.author {
            doc.author = author.clone();
        }
        if let Some(ref content) = update.content {
            doc.content = content.clone();
        }
        if let Some(ref image) = update.image {
            doc.image = Some(image.clone());
        }
        let doc = doc.clone();

        Ok(Some(inner.join(&doc)))
    }

    async fn delete_post(&self, id: i64) -> Result<bool> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }
}

impl BlogStore for DocumentStore {
    fn backend_name(&self) -> &'static str {
        "document"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let store = DocumentStore::new();

        let a = store
            .create_user(&NewUser::new("A", "a@x.com", "h"))
            .await
            .unwrap();
        let b = store
            .create_user(&NewUser::new("B", "b@x.com", "h"))
            .await
            .unwrap();

        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = DocumentStore::new();

        store
            .create_user(&NewUser::new("A", "a@x.com", "h"))
            .await
            .unwrap();
        let result = store.create_user(&NewUser::new("B", "a@x.com", "h")).await;

        assert!(matches!(result, Err(BlogError::DuplicateUser)));
    }

    #[tokio::test]
    async fn test_concurrent_register_same_email() {
        let store = std::sync::Arc::new(DocumentStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_user(&NewUser::new(format!("U{i}"), "same@x.com", "h"))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_delete_category_removes_posts() {
        let store = DocumentStore::new();

        let category = store
            .create_category(&NewCategory::new("Tech"))
            .await
            .unwrap();
        store
            .create_post(&NewPost::new(category.id, "Hello", "a", "x"))
            .await
            .unwrap();

        assert!(store.delete_category(category.id).await.unwrap());
        assert!(store.find_post_by_slug("hello").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_post_keeps_own_slug() {
        let store = DocumentStore::new();

        let category = store
            .create_category(&NewCategory::new("Tech"))
            .await
            .unwrap();
        let post = store
            .create_post(&NewPost::new(category.id, "Hello", "a", "x"))
            .await
            .unwrap();

        let updated = store
            .update_post(post.id, &PostUpdate::new("Hello"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.slug, "hello");
    }
}
