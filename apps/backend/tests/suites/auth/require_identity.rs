use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend::infra::state::build_state;
use backend_test_support::problem_details::assert_problem_details_from_service_response;

use crate::support::auth::{authenticated_state, bearer_header, mint_expired_token};
use crate::support::create_test_app;

const PROTECTED: &[(&str, &str)] = &[
    ("GET", "/fetch-data"),
    ("POST", "/upload-suppliers"),
    ("POST", "/upload-products"),
    ("GET", "/download-suppliers"),
    ("GET", "/download-products"),
    ("POST", "/save-all"),
];

fn request(method: &str, uri: &str) -> test::TestRequest {
    match method {
        "POST" => test::TestRequest::post().uri(uri),
        _ => test::TestRequest::get().uri(uri),
    }
}

#[actix_web::test]
async fn every_protected_route_requires_a_bearer_token() {
    let app = create_test_app(authenticated_state()).build().await;

    for (method, path) in PROTECTED {
        for prefix in ["", "/api"] {
            let uri = format!("{prefix}{path}");
            let resp = test::call_service(&app, request(method, &uri).to_request()).await;

            assert_problem_details_from_service_response(
                resp,
                "UNAUTHORIZED_MISSING_BEARER",
                StatusCode::UNAUTHORIZED,
                Some("Missing token"),
            )
            .await;
        }
    }
}

#[actix_web::test]
async fn malformed_authorization_headers() {
    let app = create_test_app(authenticated_state()).build().await;

    for value in ["Token abc", "Bearer", "Bearer ", "bearer abc", "Basic dXNlcjpwYXNz"] {
        let req = test::TestRequest::get()
            .uri("/fetch-data")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_problem_details_from_service_response(
            resp,
            "UNAUTHORIZED_MISSING_BEARER",
            StatusCode::UNAUTHORIZED,
            None,
        )
        .await;
    }
}

#[actix_web::test]
async fn forged_token_is_invalid() {
    let app = create_test_app(authenticated_state()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/fetch-data")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_TOKEN",
        StatusCode::UNAUTHORIZED,
        Some("Invalid or expired token"),
    )
    .await;
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let app = create_test_app(authenticated_state()).build().await;

    let req = test::TestRequest::get()
        .uri("/download-products")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", mint_expired_token("uid-stale")),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_EXPIRED_TOKEN",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn unconfigured_provider_is_401_not_500() {
    let app = create_test_app(build_state().build()).build().await;

    let req = test::TestRequest::get()
        .uri("/fetch-data")
        .insert_header((header::AUTHORIZATION, bearer_header("uid-1", None)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "AUTH_UNAVAILABLE",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn missing_token_is_reported_before_unconfigured_provider() {
    let app = create_test_app(build_state().build()).build().await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/fetch-data").to_request()).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn public_routes_ignore_bad_tokens() {
    let app = create_test_app(authenticated_state()).build().await;

    for uri in ["/", "/health", "/api/health"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((header::AUTHORIZATION, "Bearer garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "{uri}");
    }
}
