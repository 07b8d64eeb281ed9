//! Category repository for inkpost.

use super::category::{Category, NewCategory};
use super::DbPool;
use crate::error::is_unique_violation;
use crate::{BlogError, Result};

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: String,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

fn map_write_error(e: sqlx::Error) -> BlogError {
    if is_unique_violation(&e) {
        BlogError::Conflict("Category already exists".to_string())
    } else {
        BlogError::Database(e.to_string())
    }
}

/// Repository for category CRUD operations.
pub struct CategoryRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new CategoryRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new category.
    pub async fn create(&self, new_category: &NewCategory) -> Result<Category> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES (?, ?) RETURNING id",
        )
        .bind(&new_category.name)
        .bind(&new_category.description)
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("Category".to_string()))
    }

    /// Get a category by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    /// Get a category by exact name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM categories WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    /// List all categories in creation order.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM categories ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    /// Replace a category's name and description.
    ///
    /// Returns the updated category, or None if not found.
    pub async fn update(&self, id: i64, update: &NewCategory) -> Result<Option<Category>> {
        let result = sqlx::query("UPDATE categories SET name = ?, description = ? WHERE id = ?")
            .bind(&update.name)
            .bind(&update.description)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a category and, through the foreign key, its posts.
    ///
    /// Returns true if a category was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
