use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::info;

use super::auth::hash_off_thread;
use super::{not_found, require_owner, validation};
use crate::auth::ensure_not_self;
use crate::db::with_txn;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::ownership::ResourceKind;
use crate::repos::users::{NewUser, ProfileUpdate, User};
use crate::repos::{followers, posts, users};

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub nick: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub nick: String,
    pub email: String,
}

fn validated_profile(profile: Profile) -> Result<ProfileUpdate, AppError> {
    Ok(ProfileUpdate {
        name: validation::required("name", &profile.name)?,
        nick: validation::required("nick", &profile.nick)?,
        email: validation::email(&profile.email)?,
    })
}

pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration: Registration,
) -> Result<User, AppError> {
    let profile = validated_profile(Profile {
        name: registration.name,
        nick: registration.nick,
        email: registration.email,
    })?;
    validation::required("password", &registration.password)?;

    let password_hash = hash_off_thread(registration.password).await?;
    let user = users::create_user(
        conn,
        NewUser {
            name: profile.name,
            nick: profile.nick,
            email: profile.email,
            password_hash,
        },
    )
    .await?;

    info!(user_id = user.id, email = %Redacted(&user.email), "user_registered");
    Ok(user)
}

pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &str,
) -> Result<Vec<User>, AppError> {
    Ok(users::search_users(conn, query.trim()).await?)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, AppError> {
    users::find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| not_found(ResourceKind::User, user_id))
}

/// A profile the caller was confirmed to own. Only [`authorize`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedUser {
    id: i64,
}

impl OwnedUser {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// 404 if the user is missing, 403 if it is not the caller.
pub async fn authorize<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_id: i64,
    user_id: i64,
) -> Result<OwnedUser, AppError> {
    require_owner(conn, ResourceKind::User, user_id, caller_id).await?;
    Ok(OwnedUser { id: user_id })
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: OwnedUser,
    profile: Profile,
) -> Result<(), AppError> {
    let update = validated_profile(profile)?;

    if !users::update_profile(conn, user.id, update).await? {
        return Err(not_found(ResourceKind::User, user.id));
    }
    Ok(())
}

/// Delete the caller's account together with its posts and follow edges.
pub async fn delete(
    db: &DatabaseConnection,
    caller_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    let user_id = authorize(db, caller_id, user_id).await?.id();

    with_txn(db, |txn| {
        Box::pin(async move {
            followers::delete_edges_for(txn, user_id).await?;
            posts::delete_posts_by_author(txn, user_id).await?;
            if !users::delete_user(txn, user_id).await? {
                return Err(not_found(ResourceKind::User, user_id));
            }
            Ok(())
        })
    })
    .await?;

    info!(user_id, "user_deleted");
    Ok(())
}

/// `caller_id` starts following `target_id`. Already following is fine.
pub async fn follow<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_id: i64,
    target_id: i64,
) -> Result<(), AppError> {
    ensure_not_self(target_id, caller_id)?;
    if users::find_user_by_id(conn, target_id).await?.is_none() {
        return Err(not_found(ResourceKind::User, target_id));
    }
    followers::follow(conn, target_id, caller_id).await?;
    Ok(())
}

pub async fn unfollow<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_id: i64,
    target_id: i64,
) -> Result<(), AppError> {
    ensure_not_self(target_id, caller_id)?;
    followers::unfollow(conn, target_id, caller_id).await?;
    Ok(())
}

pub async fn followers_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<User>, AppError> {
    Ok(followers::list_followers(conn, user_id).await?)
}

pub async fn following_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<User>, AppError> {
    Ok(followers::list_following(conn, user_id).await?)
}
