use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, JsonBody, UserId, ValidatedJson};
use crate::repos::users::User;
use crate::services::users::{self as user_service, Profile, Registration};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub nick: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub nick: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    user: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            nick: user.nick,
            email: user.email,
            created_at: user
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}

fn user_list(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

pub async fn create(
    body: ValidatedJson<CreateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateUserRequest {
        name,
        nick,
        email,
        password,
    } = body.into_inner();

    let user = user_service::register(
        &app_state.db,
        Registration {
            name,
            nick,
            email,
            password,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// `GET /users?user=<q>`: match on name or nick.
pub async fn search(
    req: HttpRequest,
    _current: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let params = web::Query::<SearchParams>::from_query(req.query_string())
        .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query: {e}")))?;
    let users = user_service::search(&app_state.db, &params.user).await?;
    Ok(HttpResponse::Ok().json(user_list(users)))
}

pub async fn get(
    _current: CurrentUser,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get(&app_state.db, user_id.0).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn update(
    current: CurrentUser,
    user_id: UserId,
    body: JsonBody<UpdateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::authorize(&app_state.db, current.id, user_id.0).await?;
    let UpdateUserRequest { name, nick, email } = body.decode()?;
    user_service::update_profile(&app_state.db, user, Profile { name, nick, email }).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete(
    current: CurrentUser,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user_service::delete(&app_state.db, current.id, user_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn follow(
    current: CurrentUser,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user_service::follow(&app_state.db, current.id, user_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn unfollow(
    current: CurrentUser,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user_service::unfollow(&app_state.db, current.id, user_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn followers(
    _current: CurrentUser,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = user_service::followers_of(&app_state.db, user_id.0).await?;
    Ok(HttpResponse::Ok().json(user_list(users)))
}

pub async fn following(
    _current: CurrentUser,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = user_service::following_of(&app_state.db, user_id.0).await?;
    Ok(HttpResponse::Ok().json(user_list(users)))
}
