use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::auth::Claims;
use crate::error::AppError;

/// The authenticated caller, derived from claims that `JwtExtract` already
/// verified. Never reads the `Authorization` header itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<Claims>()
            .ok_or_else(AppError::unauthorized)
            .and_then(|claims| claims.user_id().map_err(AppError::from))
            .map(|id| CurrentUser { id });
        ready(result)
    }
}
