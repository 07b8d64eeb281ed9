//! User repository for inkpost.
//!
//! CRUD operations for users in the relational store.

use std::str::FromStr;

use super::user::{NewUser, Role, User};
use super::DbPool;
use crate::error::is_unique_violation;
use crate::{BlogError, Result};

/// Raw `users` row.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: String,
    token: Option<String>,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password: self.password,
            role: Role::from_str(&self.role).unwrap_or_default(),
            token: self.token,
            created_at: self.created_at,
        }
    }
}

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns `DuplicateUser` if the email is already registered.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password, role) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(new_user.role.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BlogError::DuplicateUser
            } else {
                BlogError::Database(e.to_string())
            }
        })?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("User".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, password, role, token, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    /// Get a user by email (exact match).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, password, role, token, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    /// Set or clear the stored session token.
    ///
    /// Returns false if no user has this ID.
    pub async fn set_token(&self, id: i64, token: Option<&str>) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET token = ? WHERE id = ?")
            .bind(token)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Alice", "a@x.com", "hashedpw"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, Role::User);
        assert!(user.token.is_none());
        assert!(!user.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_create_admin() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Root", "root@x.com", "hashedpw").with_role(Role::Admin))
            .await
            .unwrap();

        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Alice", "a@x.com", "pw1"))
            .await
            .unwrap();
        let result = repo.create(&NewUser::new("Other", "a@x.com", "pw2")).await;

        assert!(matches!(result, Err(BlogError::DuplicateUser)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Alice", "a@x.com", "pw"))
            .await
            .unwrap();
        repo.create(&NewUser::new("Alice", "A@x.com", "pw"))
            .await
            .unwrap();

        assert!(repo.get_by_email("A@X.COM").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id_and_email() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let created = repo
            .create(&NewUser::new("Alice", "a@x.com", "pw"))
            .await
            .unwrap();

        let found = repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(repo.get_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_and_clear_token() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Alice", "a@x.com", "pw"))
            .await
            .unwrap();

        assert!(repo.set_token(user.id, Some("tok")).await.unwrap());
        let found = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.token.as_deref(), Some("tok"));

        assert!(repo.set_token(user.id, None).await.unwrap());
        let found = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert!(found.token.is_none());

        assert!(!repo.set_token(999, None).await.unwrap());
    }
}
