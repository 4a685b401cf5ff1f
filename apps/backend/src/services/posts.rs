use sea_orm::ConnectionTrait;
use tracing::debug;

use super::{not_found, require_owner, validation};
use crate::error::AppError;
use crate::repos::ownership::ResourceKind;
use crate::repos::posts::{self, Post};

#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

fn validated(input: PostInput) -> Result<(String, String), AppError> {
    Ok((
        validation::required("title", &input.title)?,
        validation::required("content", &input.content)?,
    ))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
    input: PostInput,
) -> Result<Post, AppError> {
    let (title, content) = validated(input)?;
    let post = posts::create_post(conn, author_id, title, content).await?;
    debug!(post_id = post.id, author_id, "post_created");
    Ok(post)
}

pub async fn feed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Post>, AppError> {
    Ok(posts::feed(conn, user_id).await?)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Post, AppError> {
    posts::find_post(conn, post_id)
        .await?
        .ok_or_else(|| not_found(ResourceKind::Post, post_id))
}

pub async fn by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<Vec<Post>, AppError> {
    Ok(posts::posts_by_author(conn, author_id).await?)
}

/// A post the caller was confirmed to author. Only [`authorize`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedPost {
    id: i64,
    author_id: i64,
}

impl OwnedPost {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// 404 if the post is missing, 403 if the caller is not its author.
pub async fn authorize<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_id: i64,
    post_id: i64,
) -> Result<OwnedPost, AppError> {
    require_owner(conn, ResourceKind::Post, post_id, caller_id).await?;
    Ok(OwnedPost {
        id: post_id,
        author_id: caller_id,
    })
}

/// The write is filtered by author as well, so a post that changed hands
/// since [`authorize`] is never touched.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post: OwnedPost,
    input: PostInput,
) -> Result<(), AppError> {
    let (title, content) = validated(input)?;

    if !posts::update_post_owned(conn, post.id, post.author_id, title, content).await? {
        return Err(not_found(ResourceKind::Post, post.id));
    }
    Ok(())
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_id: i64,
    post_id: i64,
) -> Result<(), AppError> {
    let post = authorize(conn, caller_id, post_id).await?;

    if !posts::delete_post_owned(conn, post.id, post.author_id).await? {
        return Err(not_found(ResourceKind::Post, post.id));
    }
    Ok(())
}

pub async fn like<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<(), AppError> {
    if !posts::like(conn, post_id).await? {
        return Err(not_found(ResourceKind::Post, post_id));
    }
    Ok(())
}

pub async fn dislike<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<(), AppError> {
    if !posts::dislike(conn, post_id).await? {
        return Err(not_found(ResourceKind::Post, post_id));
    }
    Ok(())
}
