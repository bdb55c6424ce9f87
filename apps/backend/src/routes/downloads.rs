use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};

use crate::domain::UploadKind;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub async fn download_suppliers(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    download(&state, UploadKind::Suppliers).await
}

pub async fn download_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    download(&state, UploadKind::Products).await
}

async fn download(state: &AppState, kind: UploadKind) -> Result<HttpResponse, AppError> {
    let document = state.storage.download(kind).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(document.filename)],
        })
        .body(document.body))
}
