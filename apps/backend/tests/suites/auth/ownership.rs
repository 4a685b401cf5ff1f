use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;
use social_backend::services::{posts as post_service, users as user_service};

use crate::common::assert_problem;
use crate::support::auth::bearer_for;
use crate::support::factory::{create_test_post, create_test_user};
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn non_owner_cannot_edit_or_delete_post() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let author = create_test_user(&state, "Own Author").await;
    let other = create_test_user(&state, "Own Other").await;
    let post = create_test_post(&state, author.id, "mine").await;
    let auth = bearer_for(other.id, &state.security);
    let db = state.db.clone();
    let app = create_test_app(state).with_prod_routes().build().await?;

    let put = test::TestRequest::put()
        .uri(&format!("/posts/{}", post.id))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "title": "hijacked", "content": "hijacked" }))
        .to_request();
    let resp = test::call_service(&app, put).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN_NOT_OWNER").await;

    let delete = test::TestRequest::delete()
        .uri(&format!("/posts/{}", post.id))
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, delete).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN_NOT_OWNER").await;

    let unchanged = post_service::get(&db, post.id).await?;
    assert_eq!(unchanged.title, "mine");
    assert_eq!(unchanged.content, "mine body");
    Ok(())
}

#[actix_web::test]
async fn ownership_is_checked_before_validation() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let author = create_test_user(&state, "Own Order A").await;
    let other = create_test_user(&state, "Own Order B").await;
    let post = create_test_post(&state, author.id, "kept").await;
    let auth = bearer_for(other.id, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    let put = test::TestRequest::put()
        .uri(&format!("/posts/{}", post.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({ "title": "", "content": "" }))
        .to_request();
    let resp = test::call_service(&app, put).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN_NOT_OWNER").await;
    Ok(())
}

#[actix_web::test]
async fn non_owner_cannot_edit_or_delete_profile() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let owner = create_test_user(&state, "Own Profile").await;
    let other = create_test_user(&state, "Own Visitor").await;
    let auth = bearer_for(other.id, &state.security);
    let db = state.db.clone();
    let app = create_test_app(state).with_prod_routes().build().await?;

    let put = test::TestRequest::put()
        .uri(&format!("/users/{}", owner.id))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "name": "X", "nick": "x", "email": "x@example.com" }))
        .to_request();
    let resp = test::call_service(&app, put).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN_NOT_OWNER").await;

    let delete = test::TestRequest::delete()
        .uri(&format!("/users/{}", owner.id))
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, delete).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN_NOT_OWNER").await;

    let still_there = user_service::get(&db, owner.id).await?;
    assert_eq!(still_there.name, "Own Profile");
    Ok(())
}

#[actix_web::test]
async fn missing_resource_is_404_not_403() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let caller = create_test_user(&state, "Own Missing").await;
    let auth = bearer_for(caller.id, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    let delete = test::TestRequest::delete()
        .uri("/posts/999999")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let resp = test::call_service(&app, delete).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "POST_NOT_FOUND").await;

    let put = test::TestRequest::put()
        .uri("/users/999999")
        .insert_header(("Authorization", auth))
        .set_json(json!({ "name": "X", "nick": "x", "email": "x@example.com" }))
        .to_request();
    let resp = test::call_service(&app, put).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn non_owner_is_forbidden_even_with_undecodable_body() -> Result<(), Box<dyn std::error::Error>>
{
    let state = test_state().await?;
    let owner = create_test_user(&state, "Own Body A").await;
    let other = create_test_user(&state, "Own Body B").await;
    let post = create_test_post(&state, owner.id, "guarded").await;
    let auth = bearer_for(other.id, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    let cases = [
        (
            test::TestRequest::put().uri(&format!("/posts/{}", post.id)),
            "{\"title\": ",
        ),
        (
            test::TestRequest::put().uri(&format!("/users/{}", owner.id)),
            "{\"name\":\"x\"}",
        ),
        (
            test::TestRequest::post().uri(&format!("/users/{}/update-password", owner.id)),
            "not json at all",
        ),
    ];

    for (req, body) in cases {
        let req = req
            .insert_header(("Authorization", auth.clone()))
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN_NOT_OWNER").await;
    }
    Ok(())
}

#[actix_web::test]
async fn owner_with_undecodable_body_gets_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let owner = create_test_user(&state, "Own Body C").await;
    let post = create_test_post(&state, owner.id, "intact").await;
    let auth = bearer_for(owner.id, &state.security);
    let db = state.db.clone();
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", post.id))
        .insert_header(("Authorization", auth))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;

    assert_eq!(post_service::get(&db, post.id).await?.title, "intact");
    Ok(())
}
