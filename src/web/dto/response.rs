//! Response DTOs for Web API.

use serde::Serialize;

use crate::auth::{AuthResult, UserSummary};
use crate::db::{Category, Post};

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register or login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, result: AuthResult) -> Self {
        Self {
            message: message.into(),
            token: result.token,
            user: result.user,
        }
    }
}

/// Category update response.
#[derive(Debug, Serialize)]
pub struct CategoryUpdatedResponse {
    pub message: String,
    pub category: Category,
}

/// Post update response.
#[derive(Debug, Serialize)]
pub struct PostUpdatedResponse {
    pub message: String,
    pub post: Post,
}
