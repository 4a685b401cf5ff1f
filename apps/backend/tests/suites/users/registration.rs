use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::factory::unique_identity;
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn register_returns_created_user_without_hash() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (nick, email) = unique_identity("Reg Ok");

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "name": "  Ada Lovelace ",
            "nick": nick,
            "email": email,
            "password": "analytical-engine",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["id"].as_i64().is_some_and(|id| id > 0));
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["email"], email);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(body["created_at"].is_string());
    Ok(())
}

#[actix_web::test]
async fn invalid_email_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "name": "Bad Email",
            "nick": "bad_email",
            "email": "not-an-email",
            "password": "pw",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_EMAIL").await;
    Ok(())
}

#[actix_web::test]
async fn blank_required_fields_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    for (field, body) in [
        ("name", json!({ "name": " ", "nick": "n1", "email": "n1@example.com", "password": "pw" })),
        ("nick", json!({ "name": "N", "nick": "", "email": "n2@example.com", "password": "pw" })),
        ("password", json!({ "name": "N", "nick": "n3", "email": "n3@example.com", "password": "  " })),
    ] {
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let problem = assert_problem(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
        assert!(problem.detail.contains(field), "detail should name {field}");
    }
    Ok(())
}

#[actix_web::test]
async fn missing_field_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "No Password", "nick": "nopw", "email": "nopw@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
    Ok(())
}

#[actix_web::test]
async fn duplicate_email_and_nick_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (nick, email) = unique_identity("Reg Dup");

    let first = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "A", "nick": nick, "email": email, "password": "pw" }))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

    let same_email = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "B", "nick": format!("{nick}_2"), "email": email, "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, same_email).await;
    assert_problem(resp, StatusCode::CONFLICT, "UNIQUE_EMAIL").await;

    let same_nick = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "C", "nick": nick, "email": "other@example.com", "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, same_nick).await;
    assert_problem(resp, StatusCode::CONFLICT, "UNIQUE_NICK").await;
    Ok(())
}
