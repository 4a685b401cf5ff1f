//! Per-route authentication stage.
//!
//! Validates the bearer token and stores the verified [`Claims`] in request
//! extensions. A rejection is rendered as the response right here, so the
//! wrapped handler never runs.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::{parse_bearer, verify_access_token, AuthError, Claims};
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| AuthError::MissingCredential))
        .transpose()?;

    let token = parse_bearer(header_value)?;
    Ok(verify_access_token(token, &state.security)?)
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => Box::pin(async move {
                debug!(code = %err.code(), path = %req.path(), "auth_rejected");
                let response = err.error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
