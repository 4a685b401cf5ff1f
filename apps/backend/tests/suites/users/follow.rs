use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use crate::common::assert_problem;
use crate::support::auth::bearer_for;
use crate::support::factory::create_test_user;
use crate::support::{create_test_app, test_state};

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .map(|users| users.iter().filter_map(|u| u["id"].as_i64()).collect())
        .unwrap_or_default()
}

#[actix_web::test]
async fn follow_is_idempotent_and_listed_both_ways() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let fan = create_test_user(&state, "Fan").await;
    let star = create_test_user(&state, "Star").await;
    let auth = bearer_for(fan.id, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/users/{}/follow", star.id))
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let followers = test::TestRequest::get()
        .uri(&format!("/users/{}/followers", star.id))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, followers).await).await;
    assert_eq!(ids(&body), vec![fan.id]);

    let following = test::TestRequest::get()
        .uri(&format!("/users/{}/following", fan.id))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, following).await).await;
    assert_eq!(ids(&body), vec![star.id]);

    let unfollow = test::TestRequest::post()
        .uri(&format!("/users/{}/unfollow", star.id))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    assert_eq!(
        test::call_service(&app, unfollow).await.status(),
        StatusCode::NO_CONTENT
    );

    let followers = test::TestRequest::get()
        .uri(&format!("/users/{}/followers", star.id))
        .insert_header(("Authorization", auth))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, followers).await).await;
    assert!(ids(&body).is_empty());
    Ok(())
}

#[actix_web::test]
async fn self_follow_and_unfollow_are_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let me = create_test_user(&state, "Narcissus").await;
    let auth = bearer_for(me.id, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    for action in ["follow", "unfollow"] {
        let req = test::TestRequest::post()
            .uri(&format!("/users/{}/{action}", me.id))
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN_SELF_FOLLOW").await;
    }
    Ok(())
}

#[actix_web::test]
async fn following_missing_user_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let me = create_test_user(&state, "Lonely").await;
    let auth = bearer_for(me.id, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/users/987654/follow")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;
    Ok(())
}
