use std::time::Duration;

use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::http::StatusCode;
use actix_web::{test, web};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use social_backend::error::AppError;
use social_backend::extractors::current_user::CurrentUser;
use social_backend::middleware::jwt_extract::JwtExtract;
use social_backend::state::security_config::SecurityConfig;

use crate::common::assert_problem;
use crate::support::auth::{bearer, mint_expired_token, mint_test_token};
use crate::support::{create_test_app, test_state};

async fn whoami(current_user: CurrentUser) -> Result<web::Json<CurrentUser>, AppError> {
    Ok(web::Json(current_user))
}

fn probe_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/test-auth")
            .wrap(JwtExtract)
            .route("/me", web::get().to(whoami)),
    );
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_subject() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = mint_test_token(42, &state.security);
    let app = create_test_app(state).with_routes(probe_routes).build().await?;

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 42);
    Ok(())
}

#[actix_web::test]
async fn missing_or_malformed_header_is_missing_bearer() -> Result<(), Box<dyn std::error::Error>>
{
    let state = test_state().await?;
    let token = mint_test_token(1, &state.security);
    let app = create_test_app(state).with_routes(probe_routes).build().await?;

    let headers: Vec<Option<String>> = vec![
        None,
        Some(String::new()),
        Some("Bearer".to_string()),
        Some("Bearer ".to_string()),
        Some(format!("Basic {token}")),
        Some(token.clone()),
    ];

    for header in headers {
        let mut req = test::TestRequest::get().uri("/test-auth/me");
        if let Some(value) = &header {
            req = req.insert_header(("Authorization", value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(
            resp.headers()
                .get(WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer"),
            "header {header:?} should be challenged"
        );
        assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    }
    Ok(())
}

#[actix_web::test]
async fn expired_token_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = mint_expired_token(7, &state.security);
    let app = create_test_app(state).with_routes(probe_routes).build().await?;

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_EXPIRED_JWT").await;
    Ok(())
}

#[actix_web::test]
async fn token_from_another_key_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let foreign = SecurityConfig::new("some-other-deployment-secret");
    let token = mint_test_token(7, &foreign);
    let app = create_test_app(state).with_routes(probe_routes).build().await?;

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;
    Ok(())
}

#[actix_web::test]
async fn forged_subject_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = mint_test_token(7, &state.security);
    let app = create_test_app(state).with_routes(probe_routes).build().await?;

    // Swap the payload for one naming a different user, keep the signature.
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let payload: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(&parts[1])?)?;
    let mut forged = payload.clone();
    forged["sub"] = Value::String("8".to_string());
    parts[1] = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged)?);

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", bearer(&parts.join("."))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;
    Ok(())
}

#[actix_web::test]
async fn garbage_token_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_routes(probe_routes).build().await?;

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;
    Ok(())
}

#[actix_web::test]
async fn short_ttl_token_stays_valid_until_exp() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let short = state.security.clone().with_token_ttl(Duration::from_secs(5));
    let token = mint_test_token(3, &short);
    let app = create_test_app(state).with_routes(probe_routes).build().await?;

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn current_user_without_middleware_is_unauthorized() -> Result<(), Box<dyn std::error::Error>>
{
    let state = test_state().await?;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/unguarded/me", web::get().to(whoami));
        })
        .build()
        .await?;

    let req = test::TestRequest::get().uri("/unguarded/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    Ok(())
}

#[actix_web::test]
async fn protected_prod_route_rejects_before_handler() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    Ok(())
}
