use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{CurrentUser, JsonBody, UserId, ValidatedJson};
use crate::services::{auth as auth_service, users as user_service, validation};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// `POST /login`: exchange email and password for an access token.
pub async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = body.into_inner();
    let email = validation::required("email", &email)?;
    validation::required("password", &password)?;

    let token = auth_service::login(
        &app_state.db,
        &email,
        &password,
        SystemTime::now(),
        &app_state.security,
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// `POST /users/{user_id}/update-password`
pub async fn update_password(
    current: CurrentUser,
    user_id: UserId,
    body: JsonBody<UpdatePasswordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::authorize(&app_state.db, current.id, user_id.0).await?;
    let UpdatePasswordRequest {
        current_password,
        new_password,
    } = body.decode()?;

    auth_service::change_password(&app_state.db, user, &current_password, &new_password).await?;
    Ok(HttpResponse::NoContent().finish())
}
