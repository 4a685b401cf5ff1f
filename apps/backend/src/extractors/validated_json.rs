use std::future::Future;
use std::marker::PhantomData;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::web::{Bytes, BytesMut};
use actix_web::{FromRequest, HttpRequest};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// JSON body extractor whose failures come out as Problem Details.
///
/// A body that cannot be read is 422; a body that is not the expected JSON
/// is 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();
        Box::pin(async move {
            let body = read_body(payload).await?;
            decode(&body).map(ValidatedJson)
        })
    }
}

/// JSON body that is read during extraction but decoded only on demand.
///
/// Handlers that must authorize before looking at the input take this
/// instead of [`ValidatedJson`]; an unreadable body is still 422 up front.
#[derive(Debug)]
pub struct JsonBody<T> {
    body: Bytes,
    _target: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonBody<T> {
    pub fn decode(self) -> Result<T, AppError> {
        decode(&self.body)
    }
}

impl<T> FromRequest for JsonBody<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();
        Box::pin(async move {
            let body = read_body(payload).await?;
            Ok(JsonBody {
                body,
                _target: PhantomData,
            })
        })
    }
}

async fn read_body(mut payload: Payload) -> Result<Bytes, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "request_body_unreadable");
            AppError::unprocessable("Failed to read request body")
        })?;
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice::<T>(body).map_err(|e| {
        debug!(error = %Redacted(&e.to_string()), body_size = body.len(), "json_parse_failed");
        AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
    })
}

/// Sanitized description of a JSON failure; never echoes the body.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: missing or mistyped fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
