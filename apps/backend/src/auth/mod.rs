//! Authentication and authorization core.
//!
//! Pure functions over credentials, tokens and ownership. Nothing in here
//! touches HTTP or the database; callers convert [`AuthError`] into
//! `AppError` at the boundary.

use thiserror::Error;

pub mod bearer;
pub mod guard;
pub mod jwt;
pub mod password;

pub use bearer::parse_bearer;
pub use guard::{authorize_owned, ensure_not_self, ensure_owner};
pub use jwt::{mint_access_token, verify_access_token, verify_access_token_at, Claims};
pub use password::{hash_password, verify_password};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Crypto(String),
    #[error("password does not match")]
    PasswordMismatch,
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error("missing or malformed bearer credential")]
    MissingCredential,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    ExpiredToken,
    #[error("caller does not own the resource")]
    Ownership,
    #[error("a user cannot follow or unfollow themselves")]
    SelfFollow,
}
