use actix_web::http::header;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::auth::{authenticated_state, bearer_header};
use crate::support::create_test_app;

const SUPPLIERS_CSV: &str =
    "name,email\nAB Vasilopoulos,orders@ab.gr\nSklavenitis,sales@sklavenitis.gr";
const PRODUCTS_CSV: &str = "name,price\nMilk 1L,1.29\nBread,0.99";

fn auth() -> (header::HeaderName, String) {
    (
        header::AUTHORIZATION,
        bearer_header("uid-buyer", Some("buyer@example.com")),
    )
}

#[actix_web::test]
async fn downloads_are_fixed_csv_on_both_prefixes() {
    let app = create_test_app(authenticated_state()).build().await;

    for (path, expected, filename) in [
        ("/download-suppliers", SUPPLIERS_CSV, "suppliers.csv"),
        ("/download-products", PRODUCTS_CSV, "products.csv"),
    ] {
        for prefix in ["", "/api"] {
            let uri = format!("{prefix}{path}");
            let req = test::TestRequest::get()
                .uri(&uri)
                .insert_header(auth())
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), 200, "{uri}");
            assert_eq!(
                resp.headers().get(header::CONTENT_TYPE).unwrap(),
                "text/csv",
                "{uri}"
            );
            let disposition = resp
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .unwrap()
                .to_str()
                .unwrap()
                .to_string();
            assert!(disposition.starts_with("attachment"), "{disposition}");
            assert!(disposition.contains(filename), "{disposition}");

            let body = test::read_body(resp).await;
            assert_eq!(body, expected, "{uri}");
        }
    }
}

#[actix_web::test]
async fn fetch_data_returns_fixed_dataset() {
    let app = create_test_app(authenticated_state()).build().await;

    let mut bodies = Vec::new();
    for uri in ["/fetch-data", "/api/fetch-data"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(auth())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "{uri}");
        bodies.push(test::read_body_json::<Value, _>(resp).await);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(
        bodies[0],
        json!({
            "suppliers": [
                {"name": "AB Vasilopoulos", "email": "orders@ab.gr"},
                {"name": "Sklavenitis", "email": "sales@sklavenitis.gr"}
            ],
            "products": [
                {"name": "Milk 1L", "price": 1.29},
                {"name": "Bread", "price": 0.99}
            ]
        })
    );
}

#[actix_web::test]
async fn fetch_data_accepts_tokens_without_email() {
    let app = create_test_app(authenticated_state()).build().await;

    let req = test::TestRequest::get()
        .uri("/fetch-data")
        .insert_header((header::AUTHORIZATION, bearer_header("uid-anon", None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn save_all_acknowledges_any_json() {
    let app = create_test_app(authenticated_state()).build().await;

    for (uri, body) in [
        ("/save-all", json!({})),
        ("/api/save-all", json!({})),
        (
            "/save-all",
            json!({"suppliers": [{"name": "a", "email": "a@b.c"}], "products": []}),
        ),
        ("/save-all", json!([1, 2, 3])),
        ("/save-all", json!(null)),
    ] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(auth())
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "{uri} {body}");

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json, json!({"status": "saved"}));
    }
}

#[actix_web::test]
async fn save_all_acknowledges_missing_or_non_json_body() {
    let app = create_test_app(authenticated_state()).build().await;

    let cases: [(&str, Option<&str>, &str); 4] = [
        ("/save-all", None, ""),
        ("/api/save-all", Some("application/json"), ""),
        ("/save-all", Some("text/plain"), "hello"),
        ("/api/save-all", Some("application/x-www-form-urlencoded"), "a=1"),
    ];

    for (uri, content_type, body) in cases {
        let mut req = test::TestRequest::post().uri(uri).insert_header(auth());
        if let Some(content_type) = content_type {
            req = req.insert_header((header::CONTENT_TYPE, content_type));
        }
        let resp = test::call_service(&app, req.set_payload(body).to_request()).await;
        assert_eq!(resp.status(), 200, "{uri} {content_type:?}");

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json, json!({"status": "saved"}));
    }
}

#[actix_web::test]
async fn save_all_rejects_malformed_json() {
    let app = create_test_app(authenticated_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/save-all")
        .insert_header(auth())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"suppliers\": [")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        actix_web::http::StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
}

#[actix_web::test]
async fn save_all_enforces_body_limit() {
    let state = backend::infra::state::build_state()
        .with_verifier(authenticated_state().verifier)
        .with_body_limit(64)
        .build();
    let app = create_test_app(state).build().await;

    let big = json!({"suppliers": vec!["x".repeat(16); 16]});
    let req = test::TestRequest::post()
        .uri("/save-all")
        .insert_header(auth())
        .set_json(&big)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "PAYLOAD_TOO_LARGE",
        actix_web::http::StatusCode::PAYLOAD_TOO_LARGE,
        None,
    )
    .await;
}

#[actix_web::test]
async fn wrong_method_is_rejected() {
    let app = create_test_app(authenticated_state()).build().await;

    let req = test::TestRequest::get()
        .uri("/save-all")
        .insert_header(auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 405);
}
