use actix_web::test;
use backend::infra::state::build_state;
use serde_json::{json, Value};

use crate::support::create_test_app;

#[actix_web::test]
async fn health_reports_version_without_auth() {
    let app = create_test_app(build_state().with_version("v26").build())
        .build()
        .await;

    for uri in ["/health", "/api/health"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), 200, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"ok": true, "version": "v26"}), "{uri}");
    }
}

#[actix_web::test]
async fn health_defaults_to_crate_version() {
    let app = create_test_app(build_state().build()).build().await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn root_banner() {
    let app = create_test_app(build_state().with_version("v22").build())
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Order Helper backend running (v22)");
}

#[actix_web::test]
async fn root_is_not_mirrored() {
    let app = create_test_app(build_state().build()).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/").to_request()).await;
    assert_eq!(resp.status(), 404);
}
