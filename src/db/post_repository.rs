//! Post repository for inkpost.

use sqlx::QueryBuilder;

use super::post::{NewPost, Post, PostQuery, PostUpdate, SortOrder};
use super::DbPool;
use crate::error::is_unique_violation;
use crate::{BlogError, Result};

const SELECT_POST: &str = "SELECT p.id, p.category_id, c.name AS category_name, p.title, p.slug,
        p.author, p.content, p.image, p.created_at
 FROM posts p INNER JOIN categories c ON p.category_id = c.id";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    category_id: i64,
    category_name: String,
    title: String,
    slug: String,
    author: String,
    content: String,
    image: Option<String>,
    created_at: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            category_id: self.category_id,
            category_name: self.category_name,
            title: self.title,
            slug: self.slug,
            author: self.author,
            content: self.content,
            image: self.image,
            created_at: self.created_at,
        }
    }
}

fn map_write_error(e: sqlx::Error) -> BlogError {
    let foreign_key = e
        .as_database_error()
        .map(|db_err| db_err.is_foreign_key_violation())
        .unwrap_or(false);

    if is_unique_violation(&e) {
        BlogError::Conflict("A post with this slug already exists".to_string())
    } else if foreign_key {
        BlogError::NotFound("Category".to_string())
    } else {
        BlogError::Database(e.to_string())
    }
}

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Fails with `NotFound` if the category does not exist and with
    /// `Conflict` if the slug is taken.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (category_id, title, slug, author, content, image)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(new_post.category_id)
        .bind(&new_post.title)
        .bind(&new_post.slug)
        .bind(&new_post.author)
        .bind(&new_post.content)
        .bind(&new_post.image)
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("Post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let sql = format!("{SELECT_POST} WHERE p.id = ?");
        let row: Option<PostRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    /// Get a post by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let sql = format!("{SELECT_POST} WHERE p.slug = ?");
        let row: Option<PostRow> = sqlx::query_as(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    /// List posts with optional category filter, ordering and paging.
    pub async fn list(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(SELECT_POST);

        if let Some(category_id) = query.category_id {
            builder.push(" WHERE p.category_id = ");
            builder.push_bind(category_id);
        }

        match query.sort {
            Some(SortOrder::Asc) => builder.push(" ORDER BY p.created_at ASC, p.id ASC"),
            Some(SortOrder::Desc) => builder.push(" ORDER BY p.created_at DESC, p.id DESC"),
            None => builder.push(" ORDER BY p.id"),
        };

        // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
        match (query.limit, query.offset) {
            (Some(limit), _) => {
                builder.push(" LIMIT ");
                builder.push_bind(i64::from(limit));
            }
            (None, Some(_)) => {
                builder.push(" LIMIT -1");
            }
            (None, None) => {}
        }
        if let Some(offset) = query.offset {
            builder.push(" OFFSET ");
            builder.push_bind(i64::from(offset));
        }

        let rows: Vec<PostRow> = builder.build_query_as().fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    /// Update a post by ID.
    ///
    /// Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        separated.push("title = ");
        separated.push_bind_unseparated(&update.title);
        separated.push("slug = ");
        separated.push_bind_unseparated(&update.slug);

        if let Some(category_id) = update.category_id {
            separated.push("category_id = ");
            separated.push_bind_unseparated(category_id);
        }
        if let Some(ref author) = update.author {
            separated.push("author = ");
            separated.push_bind_unseparated(author);
        }
        if let Some(ref content) = update.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content);
        }
        if let Some(ref image) = update.image {
            separated.push("image = ");
            separated.push_bind_unseparated(image);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID.
    ///
    /// Returns true if a post was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
