//! Use-case layer: validation, authorization and persistence orchestration.
//! Handlers only translate between HTTP and these functions.

pub mod auth;
pub mod posts;
pub mod users;
pub mod validation;

use sea_orm::ConnectionTrait;

use crate::auth::authorize_owned;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::ownership::{find_owner_id, ResourceKind};

pub(crate) fn not_found(kind: ResourceKind, id: i64) -> AppError {
    match kind {
        ResourceKind::Post => {
            AppError::not_found(ErrorCode::PostNotFound, format!("Post {id} not found"))
        }
        ResourceKind::User => {
            AppError::not_found(ErrorCode::UserNotFound, format!("User {id} not found"))
        }
    }
}

/// Guard for mutations: the resource must exist and belong to `caller_id`.
pub(crate) async fn require_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: ResourceKind,
    id: i64,
    caller_id: i64,
) -> Result<(), AppError> {
    let owner = authorize_owned(caller_id, || async {
        find_owner_id(conn, kind, id).await.map_err(AppError::from)
    })
    .await?;
    owner.map(|_| ()).ok_or_else(|| not_found(kind, id))
}
