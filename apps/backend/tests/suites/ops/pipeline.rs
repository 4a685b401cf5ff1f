use actix_web::http::StatusCode;
use actix_web::test;

use crate::common::assert_problem;
use crate::support::auth::bearer_for;
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn every_response_carries_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let ok = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let denied = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;

    let first = ok.headers().get("x-request-id").cloned();
    let second = denied.headers().get("x-request-id").cloned();
    assert!(first.is_some());
    assert!(second.is_some());
    assert_ne!(first, second);

    // Error bodies are stamped with the same id.
    let trace = second
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();
    let problem = assert_problem(denied, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    assert_eq!(problem.trace_id, trace);
    Ok(())
}

#[actix_web::test]
async fn unknown_route_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[actix_web::test]
async fn unlisted_method_on_public_path_falls_through() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let auth = bearer_for(1, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    // Only POST /login exists.
    let req = test::TestRequest::get()
        .uri("/login")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
