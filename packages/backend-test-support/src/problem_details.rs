//! Assertions for the Problem Details error contract.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Mirror of the backend's error body, decoupled from backend types.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Validate raw response parts against the error contract and return the
/// parsed body for further checks.
///
/// Checks:
/// - HTTP status matches expected
/// - content type is `application/problem+json`
/// - `x-trace-id` header exists and matches the body's `trace_id`
/// - 401 responses carry `WWW-Authenticate: Bearer`
/// - code and (optionally) a detail substring match
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let problem: ProblemDetailsLike = serde_json::from_slice(body_bytes)
        .expect("Response body should be valid ProblemDetails JSON");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );

    if expected_status == StatusCode::UNAUTHORIZED {
        let challenge = headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(challenge, "Bearer", "401 responses must challenge with Bearer");
    }

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());

    if let Some(expected_detail) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected_detail),
            "Expected detail to contain '{}', but got '{}'",
            expected_detail,
            problem.detail
        );
    }

    problem
}

/// Same as [`assert_problem_details_from_parts`], for a test service response.
pub async fn assert_problem_details_from_service_response(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    )
}
