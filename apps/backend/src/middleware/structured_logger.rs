use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::Claims;

/// One `request_completed` event per request, whatever the outcome,
/// including requests rejected by the auth stage.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let host = req.connection_info().host().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, user_id) = match &result {
                Ok(res) => (res.status(), caller_id(res)),
                Err(err) => (err.as_response_error().status_code(), None),
            };
            let status_code = status.as_u16();
            let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

            // user_id is only present once JwtExtract accepted the token.
            match status_class(status) {
                StatusClass::ServerError => error!(
                    http.method = %method, url.path = %path, http.host = %host,
                    http.status_code = status_code, user_id, duration_us, "request_completed"
                ),
                StatusClass::ClientError => warn!(
                    http.method = %method, url.path = %path, http.host = %host,
                    http.status_code = status_code, user_id, duration_us, "request_completed"
                ),
                StatusClass::Ok => info!(
                    http.method = %method, url.path = %path, http.host = %host,
                    http.status_code = status_code, user_id, duration_us, "request_completed"
                ),
            }

            result
        })
    }
}

enum StatusClass {
    Ok,
    ClientError,
    ServerError,
}

fn status_class(status: StatusCode) -> StatusClass {
    if status.is_server_error() {
        StatusClass::ServerError
    } else if status.is_client_error() {
        StatusClass::ClientError
    } else {
        StatusClass::Ok
    }
}

fn caller_id<B>(res: &ServiceResponse<B>) -> Option<i64> {
    res.request()
        .extensions()
        .get::<Claims>()
        .and_then(|claims| claims.user_id().ok())
}
