use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// RFC 7807 body returned for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Missing or invalid Bearer token")]
    UnauthorizedMissingBearer,
    #[error("Invalid JWT")]
    UnauthorizedInvalidJwt,
    #[error("Token expired")]
    UnauthorizedExpiredJwt,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Forbidden: not the owner")]
    ForbiddenNotOwner,
    #[error("Forbidden: self follow")]
    ForbiddenSelfFollow,
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::UnauthorizedMissingBearer => ErrorCode::UnauthorizedMissingBearer,
            AppError::UnauthorizedInvalidJwt => ErrorCode::UnauthorizedInvalidJwt,
            AppError::UnauthorizedExpiredJwt => ErrorCode::UnauthorizedExpiredJwt,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::ForbiddenNotOwner => ErrorCode::ForbiddenNotOwner,
            AppError::ForbiddenSelfFollow => ErrorCode::ForbiddenSelfFollow,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Db { detail }
            | AppError::DbUnavailable { detail }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail.clone(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::UnauthorizedMissingBearer => "Missing or invalid Bearer token".to_string(),
            AppError::UnauthorizedInvalidJwt => "Invalid JWT".to_string(),
            AppError::UnauthorizedExpiredJwt => "Token expired".to_string(),
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::ForbiddenNotOwner => {
                "It is not possible to modify a resource that is not yours".to_string()
            }
            AppError::ForbiddenSelfFollow => {
                "It is not possible to follow or unfollow yourself".to_string()
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized
            | AppError::UnauthorizedMissingBearer
            | AppError::UnauthorizedInvalidJwt
            | AppError::UnauthorizedExpiredJwt
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenNotOwner | AppError::ForbiddenSelfFollow => {
                StatusCode::FORBIDDEN
            }
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::UnprocessableBody,
            detail: detail.into(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(|c| c.to_lowercase()))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => AppError::UnauthorizedMissingBearer,
            AuthError::InvalidSignature => AppError::UnauthorizedInvalidJwt,
            AuthError::ExpiredToken => AppError::UnauthorizedExpiredJwt,
            AuthError::PasswordMismatch => AppError::InvalidCredentials,
            AuthError::Ownership => AppError::ForbiddenNotOwner,
            AuthError::SelfFollow => AppError::ForbiddenSelfFollow,
            AuthError::Crypto(detail) => AppError::internal(format!("crypto failure: {detail}")),
            AuthError::Signing(detail) => {
                AppError::internal(format!("token signing failure: {detail}"))
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::invalid(ErrorCode::ValidationError, detail),
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::User => ErrorCode::UserNotFound,
                    NotFoundKind::Post => ErrorCode::PostNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::UniqueEmail => ErrorCode::UniqueEmail,
                    ConflictKind::UniqueNick => ErrorCode::UniqueNick,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable | InfraErrorKind::Timeout => {
                    AppError::DbUnavailable { detail }
                }
                _ => AppError::db(detail),
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://social.example/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.to_string(),
            trace_id: trace_id.clone(),
        };

        let mut builder = HttpResponse::build(status);
        builder
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id));

        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        if status == StatusCode::SERVICE_UNAVAILABLE {
            builder.insert_header((header::RETRY_AFTER, "1"));
        }

        builder.json(problem_details)
    }
}
