//! Storage-agnostic errors for repos and services. HTTP status mapping
//! happens only in `From<DomainError> for AppError`.

use thiserror::Error;

/// Operational failure kinds; `DbUnavailable` becomes 503.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Post,
    Record,
}

/// Unique constraints surfaced as 409.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UniqueEmail,
    UniqueNick,
    Other(String),
}

/// What repos and services fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input validation or business rule violation
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Database or connection failure
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
