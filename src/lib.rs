//! inkpost - a blogging platform backend
//!
//! REST endpoints for posts, categories and user accounts over a
//! relational (SQLite) or document store, with bearer-token sessions.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod store;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthResult, Claims, PasswordError, Profile, SessionManager,
    TokenIssuer, UserSummary,
};
pub use config::{Config, StoreBackend};
pub use db::{Category, Database, NewCategory, NewPost, NewUser, Post, Role, User};
pub use error::{BlogError, Result};
pub use store::{open_store, BlogStore, DocumentStore, SharedStore, SqlStore};
pub use web::WebServer;
