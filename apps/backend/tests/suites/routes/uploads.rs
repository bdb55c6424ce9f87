use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend::infra::state::build_state;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::auth::{authenticated_state, bearer_header};
use crate::support::create_test_app;
use crate::support::multipart;

fn auth() -> (header::HeaderName, String) {
    (header::AUTHORIZATION, bearer_header("uid-uploader", None))
}

#[actix_web::test]
async fn upload_acknowledges_category() {
    let app = create_test_app(authenticated_state()).build().await;

    for (uri, kind) in [
        ("/upload-suppliers", "suppliers"),
        ("/api/upload-suppliers", "suppliers"),
        ("/upload-products", "products"),
        ("/api/upload-products", "products"),
    ] {
        let body = multipart::body(&[(
            "file",
            Some("catalog.csv"),
            "name,email\nAB Vasilopoulos,orders@ab.gr\n",
        )]);
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(auth())
            .insert_header((header::CONTENT_TYPE, multipart::content_type()))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "{uri}");

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json, json!({"status": "ok", "type": kind}), "{uri}");
    }
}

#[actix_web::test]
async fn extra_fields_are_ignored() {
    let app = create_test_app(authenticated_state()).build().await;

    let body = multipart::body(&[
        ("note", None, "weekly order"),
        ("file", Some("products.csv"), "name,price\nBread,0.99\n"),
        ("file", Some("second.csv"), "ignored"),
    ]);
    let req = test::TestRequest::post()
        .uri("/upload-products")
        .insert_header(auth())
        .insert_header((header::CONTENT_TYPE, multipart::content_type()))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn missing_file_field_is_400() {
    let app = create_test_app(authenticated_state()).build().await;

    let body = multipart::body(&[("attachment", Some("suppliers.csv"), "name,email\n")]);
    let req = test::TestRequest::post()
        .uri("/api/upload-suppliers")
        .insert_header(auth())
        .insert_header((header::CONTENT_TYPE, multipart::content_type()))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "MISSING_UPLOAD",
        StatusCode::BAD_REQUEST,
        Some("No file uploaded"),
    )
    .await;
}

#[actix_web::test]
async fn text_field_named_file_is_not_an_upload() {
    let app = create_test_app(authenticated_state()).build().await;

    let body = multipart::body(&[("file", None, "name,email\nAB,orders@ab.gr\n")]);
    let req = test::TestRequest::post()
        .uri("/upload-suppliers")
        .insert_header(auth())
        .insert_header((header::CONTENT_TYPE, multipart::content_type()))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "MISSING_UPLOAD",
        StatusCode::BAD_REQUEST,
        Some("No file uploaded"),
    )
    .await;
}

#[actix_web::test]
async fn non_multipart_body_is_missing_upload() {
    let app = create_test_app(authenticated_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/upload-products")
        .insert_header(auth())
        .set_json(json!({"file": "name,price"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "MISSING_UPLOAD",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn oversized_upload_is_413() {
    let state = build_state()
        .with_verifier(authenticated_state().verifier)
        .with_body_limit(16)
        .build();
    let app = create_test_app(state).build().await;

    let contents = "x".repeat(64);
    let body = multipart::body(&[("file", Some("big.csv"), contents.as_str())]);
    let req = test::TestRequest::post()
        .uri("/upload-suppliers")
        .insert_header(auth())
        .insert_header((header::CONTENT_TYPE, multipart::content_type()))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "PAYLOAD_TOO_LARGE",
        StatusCode::PAYLOAD_TOO_LARGE,
        None,
    )
    .await;
}

#[actix_web::test]
async fn upload_requires_auth_before_reading_body() {
    let app = create_test_app(authenticated_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/upload-suppliers")
        .insert_header((header::CONTENT_TYPE, multipart::content_type()))
        .set_payload(multipart::body(&[("file", Some("s.csv"), "x")]))
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
