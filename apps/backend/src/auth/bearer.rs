use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use crate::AppError;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Absent, non-ASCII, wrong-scheme, or empty-token headers all fail with
/// `UNAUTHORIZED_MISSING_BEARER` before any identity provider is consulted.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .trim();

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(token.to_string())
}
