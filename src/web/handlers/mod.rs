//! API handlers for inkpost.

pub mod category;
pub mod post;
pub mod user;

pub use category::*;
pub use post::*;
pub use user::*;

use axum::extract::{rejection::PathRejection, Path};

use crate::auth::SessionManager;
use crate::store::SharedStore;
use crate::web::error::ApiError;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Configured store backend.
    pub store: SharedStore,
    /// Session lifecycle over the same store.
    pub sessions: SessionManager,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: SharedStore, sessions: SessionManager) -> Self {
        Self { store, sessions }
    }
}

/// Unwrap a numeric path ID, rejecting non-numeric input with 400.
fn path_id(path: Result<Path<i64>, PathRejection>, what: &str) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}
