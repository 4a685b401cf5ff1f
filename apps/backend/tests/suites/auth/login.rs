use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use social_backend::auth::verify_access_token;

use crate::common::assert_problem;
use crate::support::factory::{create_test_user, DEFAULT_PASSWORD};
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn login_returns_token_for_registered_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let security = state.security.clone();
    let user = create_test_user(&state, "Login Ok").await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": user.email, "password": DEFAULT_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token should be a string");
    let claims = verify_access_token(token, &security)?;
    assert_eq!(claims.user_id()?, user.id);
    assert_eq!(claims.exp - claims.iat, security.token_ttl.as_secs() as i64);
    Ok(())
}

#[actix_web::test]
async fn login_email_is_trimmed() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let user = create_test_user(&state, "Login Trim").await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": format!("  {}  ", user.email), "password": DEFAULT_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn wrong_password_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let user = create_test_user(&state, "Login Wrong").await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": user.email, "password": "not-the-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
    Ok(())
}

#[actix_web::test]
async fn unknown_email_looks_like_wrong_password() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "whatever" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
    Ok(())
}

#[actix_web::test]
async fn blank_fields_are_rejected_before_lookup() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    for body in [
        json!({ "email": "   ", "password": "pw" }),
        json!({ "email": "a@example.com", "password": "" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    }
    Ok(())
}

#[actix_web::test]
async fn malformed_body_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
    Ok(())
}
