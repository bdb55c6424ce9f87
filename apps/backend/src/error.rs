use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::errors::ErrorCode;
use crate::trace_ctx;

const GENERIC_INTERNAL_DETAIL: &str = "Internal server error";

/// RFC 7807 error body.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Unauthorized ({code}): {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Bad request ({code}): {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Payload too large: {detail}")]
    PayloadTooLarge { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Identity provider unavailable: {detail}")]
    ProviderUnavailable { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::ProviderUnavailable { .. } => ErrorCode::IdentityProviderUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Detail safe to show to the caller. Server-side failures collapse to a
    /// generic message; the real detail only goes to the log.
    pub fn public_detail(&self) -> String {
        match self {
            AppError::Unauthorized { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::PayloadTooLarge { detail } => detail.clone(),
            AppError::NotFound { detail } => detail.clone(),
            AppError::ProviderUnavailable { .. }
            | AppError::Config { .. }
            | AppError::Internal { .. } => GENERIC_INTERNAL_DETAIL.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ProviderUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedMissingBearer,
            detail: "Missing token".to_string(),
        }
    }

    pub fn unauthorized_invalid_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedInvalidToken,
            detail: "Invalid or expired token".to_string(),
        }
    }

    pub fn unauthorized_expired_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedExpiredToken,
            detail: "Token expired".to_string(),
        }
    }

    pub fn auth_unavailable() -> Self {
        Self::Unauthorized {
            code: ErrorCode::AuthUnavailable,
            detail: "Authentication is not configured on this server".to_string(),
        }
    }

    pub fn missing_upload(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code: ErrorCode::MissingUpload,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::PayloadTooLarge {
            detail: format!("Request body exceeds {limit} bytes"),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn provider_unavailable(detail: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::internal(format!("io error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code = %code, error = %self, "request failed");
        }

        let problem_details = ProblemDetails {
            type_: format!("https://order-helper.app/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.public_detail(),
            code: code.to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
