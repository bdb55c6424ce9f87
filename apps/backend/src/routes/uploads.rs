//! Catalog file uploads.
//!
//! Expects `multipart/form-data` with a file part (one carrying a filename)
//! named `file`. Other fields are read and discarded. The whole body counts
//! against the configured body limit.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tracing::debug;

use crate::domain::{UploadKind, UploadPayload, UploadReceipt};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

pub const FILE_FIELD: &str = "file";

const NO_FILE: &str = "No file uploaded; expected multipart field 'file'";

pub async fn upload_suppliers(
    req: HttpRequest,
    state: web::Data<AppState>,
    multipart: Multipart,
) -> Result<HttpResponse, AppError> {
    upload(&req, &state, multipart, UploadKind::Suppliers).await
}

pub async fn upload_products(
    req: HttpRequest,
    state: web::Data<AppState>,
    multipart: Multipart,
) -> Result<HttpResponse, AppError> {
    upload(&req, &state, multipart, UploadKind::Products).await
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

fn multipart_error(e: MultipartError) -> AppError {
    debug!(error = %e, "malformed multipart body");
    AppError::bad_request(ErrorCode::BadRequest, "Malformed multipart body")
}

/// Running total of bytes read across all fields.
struct BodyBudget {
    used: usize,
    limit: usize,
}

impl BodyBudget {
    async fn read(&mut self, field: &mut Field) -> Result<Bytes, AppError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(multipart_error)?;
            self.used += chunk.len();
            if self.used > self.limit {
                return Err(AppError::payload_too_large(self.limit));
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

async fn upload(
    req: &HttpRequest,
    state: &AppState,
    mut multipart: Multipart,
    kind: UploadKind,
) -> Result<HttpResponse, AppError> {
    if !is_multipart(req) {
        return Err(AppError::missing_upload(NO_FILE));
    }

    let mut budget = BodyBudget {
        used: 0,
        limit: state.body_limit,
    };
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(multipart_error)?;

        // Only a file part counts; a plain text field named `file` does not.
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match filename {
            Some(filename) if file.is_none() && field.name() == Some(FILE_FIELD) => {
                let bytes = budget.read(&mut field).await?;
                file = Some((filename, bytes));
            }
            _ => {
                budget.read(&mut field).await?;
            }
        }
    }

    let (filename, bytes) = file.ok_or_else(|| AppError::missing_upload(NO_FILE))?;

    state
        .storage
        .upload(UploadPayload {
            kind,
            filename,
            bytes,
        })
        .await?;

    Ok(HttpResponse::Ok().json(UploadReceipt::accepted(kind)))
}
