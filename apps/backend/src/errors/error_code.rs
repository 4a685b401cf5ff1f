//! Error codes for the social backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token failed signature verification or could not be decoded
    UnauthorizedInvalidJwt,
    /// Token is past its expiry
    UnauthorizedExpiredJwt,
    /// Email/password pair did not match
    InvalidCredentials,
    /// Caller does not own the resource being mutated
    ForbiddenNotOwner,
    /// Caller tried to follow or unfollow themselves
    ForbiddenSelfFollow,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Request body could not be read
    UnprocessableBody,
    /// Invalid email address
    InvalidEmail,
    /// Invalid user id in path
    InvalidUserId,
    /// Invalid post id in path
    InvalidPostId,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Post not found
    PostNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Email already registered
    UniqueEmail,
    /// Nick already taken
    UniqueNick,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ForbiddenNotOwner => "FORBIDDEN_NOT_OWNER",
            Self::ForbiddenSelfFollow => "FORBIDDEN_SELF_FOLLOW",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::UnprocessableBody => "UNPROCESSABLE_BODY",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidPostId => "INVALID_POST_ID",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::UniqueNick => "UNIQUE_NICK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
