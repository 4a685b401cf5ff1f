use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::error::AppError;
use crate::extractors::{CurrentUser, JsonBody, PostId, UserId, ValidatedJson};
use crate::repos::posts::Post;
use crate::services::posts::{self as post_service, PostInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

impl From<PostRequest> for PostInput {
    fn from(req: PostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub author_nick: String,
    pub likes: i64,
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            author_nick: post.author_nick,
            likes: post.likes,
            created_at: post
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}

fn post_list(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(PostResponse::from).collect()
}

pub async fn create(
    current: CurrentUser,
    body: ValidatedJson<PostRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = post_service::create(&app_state.db, current.id, body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// `GET /posts`: the caller's feed.
pub async fn feed(
    current: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let posts = post_service::feed(&app_state.db, current.id).await?;
    Ok(HttpResponse::Ok().json(post_list(posts)))
}

pub async fn get(
    _current: CurrentUser,
    post_id: PostId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = post_service::get(&app_state.db, post_id.0).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

pub async fn by_user(
    _current: CurrentUser,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let posts = post_service::by_author(&app_state.db, user_id.0).await?;
    Ok(HttpResponse::Ok().json(post_list(posts)))
}

/// Authorship is settled before the body is decoded.
pub async fn update(
    current: CurrentUser,
    post_id: PostId,
    body: JsonBody<PostRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = post_service::authorize(&app_state.db, current.id, post_id.0).await?;
    let input = body.decode()?;
    post_service::update(&app_state.db, post, input.into()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete(
    current: CurrentUser,
    post_id: PostId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    post_service::delete(&app_state.db, current.id, post_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn like(
    _current: CurrentUser,
    post_id: PostId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    post_service::like(&app_state.db, post_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn dislike(
    _current: CurrentUser,
    post_id: PostId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    post_service::dislike(&app_state.db, post_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
