//! Owner lookup for the authorization guard.

use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect};

use crate::entities::{posts, users};
use crate::errors::domain::DomainError;

/// Kinds of resource whose mutation is restricted to an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Owned by its author
    Post,
    /// A profile (and its password) is owned by the user itself
    User,
}

/// Owner id of the resource, or `None` if it does not exist.
pub async fn find_owner_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: ResourceKind,
    id: i64,
) -> Result<Option<i64>, DomainError> {
    let owner = match kind {
        ResourceKind::Post => {
            posts::Entity::find_by_id(id)
                .select_only()
                .column(posts::Column::AuthorId)
                .into_tuple::<i64>()
                .one(conn)
                .await?
        }
        ResourceKind::User => {
            users::Entity::find_by_id(id)
                .select_only()
                .column(users::Column::Id)
                .into_tuple::<i64>()
                .one(conn)
                .await?
        }
    };
    Ok(owner)
}
