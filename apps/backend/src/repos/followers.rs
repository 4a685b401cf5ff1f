use sea_orm::sea_query::{OnConflict, Query};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use time::OffsetDateTime;

use super::users::User;
use crate::entities::{followers, users};
use crate::errors::domain::DomainError;

/// Record that `follower_id` follows `user_id`. Following twice is a no-op.
pub async fn follow<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    follower_id: i64,
) -> Result<(), DomainError> {
    let edge = followers::ActiveModel {
        user_id: Set(user_id),
        follower_id: Set(follower_id),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    followers::Entity::insert(edge)
        .on_conflict(
            OnConflict::columns([followers::Column::UserId, followers::Column::FollowerId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn unfollow<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    follower_id: i64,
) -> Result<(), DomainError> {
    followers::Entity::delete_many()
        .filter(followers::Column::UserId.eq(user_id))
        .filter(followers::Column::FollowerId.eq(follower_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Users following `user_id`.
pub async fn list_followers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<User>, DomainError> {
    let ids = Query::select()
        .column(followers::Column::FollowerId)
        .from(followers::Entity)
        .and_where(followers::Column::UserId.eq(user_id))
        .to_owned();
    let found = users::Entity::find()
        .filter(users::Column::Id.in_subquery(ids))
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await?;
    Ok(found.into_iter().map(User::from).collect())
}

/// Users that `user_id` follows.
pub async fn list_following<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<User>, DomainError> {
    let ids = Query::select()
        .column(followers::Column::UserId)
        .from(followers::Entity)
        .and_where(followers::Column::FollowerId.eq(user_id))
        .to_owned();
    let found = users::Entity::find()
        .filter(users::Column::Id.in_subquery(ids))
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await?;
    Ok(found.into_iter().map(User::from).collect())
}

/// Remove every edge touching `user_id`, in either direction.
pub async fn delete_edges_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, DomainError> {
    let result = followers::Entity::delete_many()
        .filter(
            Condition::any()
                .add(followers::Column::UserId.eq(user_id))
                .add(followers::Column::FollowerId.eq(user_id)),
        )
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
