//! Typed, validated numeric ids taken from route segments.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

fn positive_segment(
    req: &HttpRequest,
    name: &str,
    code: ErrorCode,
) -> Result<i64, AppError> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| AppError::bad_request(code, format!("Missing {name} parameter")))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request(
            code,
            format!("{name} must be a positive integer, got: {raw}"),
        )),
    }
}

/// `{user_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_segment(req, "user_id", ErrorCode::InvalidUserId).map(UserId))
    }
}

/// `{post_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostId(pub i64);

impl FromRequest for PostId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_segment(req, "post_id", ErrorCode::InvalidPostId).map(PostId))
    }
}
