use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::state::app_state::AppState;

pub async fn root(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Order Helper backend running ({})", state.version))
}

#[derive(Debug, Serialize)]
struct HealthResponse<'a> {
    ok: bool,
    version: &'a str,
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        version: &state.version,
    })
}
