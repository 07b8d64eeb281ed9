//! Session lifecycle for inkpost.
//!
//! A session is a signed bearer token mirrored in `User.token`. Register and
//! login issue a token and overwrite the stored copy; logout clears it.

use serde::Serialize;
use tracing::{debug, info};

use super::password::{hash_password_async, verify_dummy_async, verify_password_async};
use super::token::{Claims, TokenIssuer};
use crate::db::{NewUser, User};
use crate::store::SharedStore;
use crate::{BlogError, Result};

/// Public view of a user returned alongside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Result of a successful register or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResult {
    pub token: String,
    pub user: UserSummary,
}

/// The authenticated user's profile, including the stored token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: Option<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Register, login, logout and profile over a store and a token issuer.
#[derive(Clone)]
pub struct SessionManager {
    store: SharedStore,
    issuer: TokenIssuer,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(store: SharedStore, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    /// Get the token issuer.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Create an account and sign it in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResult> {
        if is_blank(name) || is_blank(email) || password.is_empty() {
            return Err(BlogError::Validation("All fields are required".to_string()));
        }

        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(BlogError::DuplicateUser);
        }

        let password_hash = hash_password_async(password.to_string()).await?;
        let user = self
            .store
            .create_user(&NewUser::new(name, email, password_hash))
            .await?;

        let token = self.issuer.issue(user.id, &user.email)?;
        self.store.set_user_token(user.id, Some(&token)).await?;

        info!(user_id = user.id, "User registered");

        Ok(AuthResult {
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Check credentials and issue a fresh token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult> {
        if is_blank(email) || password.is_empty() {
            return Err(BlogError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let Some(user) = self.store.find_user_by_email(email).await? else {
            verify_dummy_async(password.to_string()).await;
            debug!("Login for unknown email");
            return Err(BlogError::InvalidCredentials);
        };

        if verify_password_async(password.to_string(), user.password.clone())
            .await
            .is_err()
        {
            debug!(user_id = user.id, "Password mismatch");
            return Err(BlogError::InvalidCredentials);
        }

        let token = self.issuer.issue(user.id, &user.email)?;
        self.store.set_user_token(user.id, Some(&token)).await?;

        info!(user_id = user.id, "User logged in");

        Ok(AuthResult {
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Clear the stored token. Succeeds even if the user no longer exists.
    pub async fn logout(&self, claims: &Claims) -> Result<()> {
        let found = self.store.set_user_token(claims.id, None).await?;
        info!(user_id = claims.id, found, "User logged out");
        Ok(())
    }

    /// Load the profile of the token's user.
    pub async fn profile(&self, claims: &Claims) -> Result<Profile> {
        let user = self
            .store
            .find_user_by_id(claims.id)
            .await?
            .ok_or_else(|| BlogError::NotFound("User".to_string()))?;

        Ok(Profile {
            id: user.id,
            name: user.name,
            email: user.email,
            token: user.token,
        })
    }

    /// Check that `token` is the one currently stored for the claims' user.
    pub async fn is_current(&self, claims: &Claims, token: &str) -> Result<bool> {
        let user = self.store.find_user_by_id(claims.id).await?;
        Ok(user.and_then(|u| u.token).as_deref() == Some(token))
    }
}
