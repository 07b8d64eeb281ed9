//! Web API module for inkpost.
//!
//! REST endpoints for users, categories and posts over the configured
//! store backend.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
