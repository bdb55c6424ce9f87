use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::config::DEFAULT_BODY_LIMIT;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

/// JSON body extractor with Problem Details errors.
///
/// An empty body, or a body whose content type is not JSON, yields
/// `T::default()`. A JSON body that fails to parse becomes 400 `BAD_REQUEST`
/// with a sanitized message, and bodies larger than
/// [`AppState::body_limit`] become 413.
#[derive(Debug)]
pub struct JsonOrDefault<T>(pub T);

impl<T> JsonOrDefault<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for JsonOrDefault<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for JsonOrDefault<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let limit = body_limit(req);
        let content_type = content_type(req);

        Box::pin(async move {
            let body = read_body(&mut payload, limit).await?;
            if body.is_empty() || !is_json_content_type(&content_type) {
                debug!(
                    content_type = %content_type,
                    body_size = body.len(),
                    "no JSON body; using default"
                );
                return Ok(JsonOrDefault(T::default()));
            }
            parse_json(&body, &content_type).map(JsonOrDefault)
        })
    }
}

fn body_limit(req: &HttpRequest) -> usize {
    req.app_data::<web::Data<AppState>>()
        .map(|state| state.body_limit)
        .unwrap_or(DEFAULT_BODY_LIMIT)
}

fn content_type(req: &HttpRequest) -> String {
    req.headers()
        .get("content-type")
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

async fn read_body(payload: &mut Payload, limit: usize) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "Failed to read request body chunk");
            AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
        })?;
        if body.len() + chunk.len() > limit {
            return Err(AppError::payload_too_large(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn parse_json<T: DeserializeOwned>(body: &[u8], content_type: &str) -> Result<T, AppError> {
    serde_json::from_slice::<T>(body).map_err(|e| {
        debug!(
            error = %Redacted(&e.to_string()),
            content_type = %content_type,
            body_size = body.len(),
            "JSON parsing failed"
        );
        AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
    })
}

/// Sanitized, caller-facing description of a JSON failure.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
