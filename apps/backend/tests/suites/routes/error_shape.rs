use actix_web::http::StatusCode;
use actix_web::test;
use backend::infra::state::build_state;
use backend_test_support::problem_details::assert_problem_details_from_service_response;

use crate::support::create_test_app;

#[actix_web::test]
async fn unknown_path_is_problem_details_404() {
    let app = create_test_app(build_state().build()).build().await;

    let req = test::TestRequest::get().uri("/api/orders").to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        "NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("/api/orders"),
    )
    .await;
    assert_eq!(problem.type_, "https://order-helper.app/errors/NOT_FOUND");
    assert_eq!(problem.title, "Not Found");
}

#[actix_web::test]
async fn trace_id_matches_request_id_header() {
    let app = create_test_app(build_state().build()).build().await;

    let req = test::TestRequest::get()
        .uri("/fetch-data")
        .insert_header(("x-request-id", "edge-1234"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("x-request-id").unwrap(), "edge-1234");
    let problem = assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    assert_eq!(problem.trace_id, "edge-1234");
}
