//! Authentication module for inkpost.
//!
//! This module provides password hashing, bearer token signing and the
//! session lifecycle (register, login, logout, profile).

mod password;
mod session;
mod token;

pub use password::{
    hash_password, hash_password_async, verify_password, verify_password_async, PasswordError,
};
pub use session::{AuthResult, Profile, SessionManager, UserSummary};
pub use token::{Claims, TokenIssuer};
