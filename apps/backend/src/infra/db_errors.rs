//! SeaORM -> DomainError translation.
//!
//! Repos surface `sea_orm::DbErr`; this is the one place it becomes a
//! `DomainError`, which higher layers map to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// SQLite reports uniqueness failures as `UNIQUE constraint failed: table.column`.
fn sqlite_unique_column(msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = msg.find(MARKER)? + MARKER.len();
    msg[start..].split_whitespace().next()
}

fn conflict_for_column(column: &str) -> Option<(ConflictKind, &'static str)> {
    match column.trim_end_matches(|c: char| !c.is_alphanumeric() && c != '_') {
        "users.email" => Some((ConflictKind::UniqueEmail, "Email already registered")),
        "users.nick" => Some((ConflictKind::UniqueNick, "Nick already taken")),
        _ => None,
    }
}

/// Postgres reports the index name instead of the column.
fn conflict_for_constraint(msg: &str) -> Option<(ConflictKind, &'static str)> {
    if msg.contains("ux_users_email") {
        return Some((ConflictKind::UniqueEmail, "Email already registered"));
    }
    if msg.contains("ux_users_nick") {
        return Some((ConflictKind::UniqueNick, "Nick already taken"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Record, "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        let mapped = sqlite_unique_column(&error_msg)
            .and_then(conflict_for_column)
            .or_else(|| conflict_for_constraint(&error_msg));
        if let Some((kind, detail)) = mapped {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Referenced record does not exist");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
