//! Error codes for the Order Helper backend API.
//!
//! Every error response carries exactly one of these codes. Add new codes
//! here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes, each mapping to the SCREAMING_SNAKE_CASE string
/// that appears in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No Authorization header, or not of the form `Bearer <token>`
    UnauthorizedMissingBearer,
    /// Identity provider rejected the token
    UnauthorizedInvalidToken,
    /// Token was well-formed but has expired
    UnauthorizedExpiredToken,
    /// No identity provider was configured at startup
    AuthUnavailable,

    // Request validation
    /// Upload request carried no `file` field
    MissingUpload,
    /// Request body exceeded the configured limit
    PayloadTooLarge,
    /// General bad request error
    BadRequest,
    /// No route matched the request
    NotFound,

    // System errors
    /// Identity provider keys could not be fetched
    IdentityProviderUnavailable,
    /// Configuration error
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            Self::UnauthorizedExpiredToken => "UNAUTHORIZED_EXPIRED_TOKEN",
            Self::AuthUnavailable => "AUTH_UNAVAILABLE",
            Self::MissingUpload => "MISSING_UPLOAD",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::IdentityProviderUnavailable => "IDENTITY_PROVIDER_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidToken,
        Self::UnauthorizedExpiredToken,
        Self::AuthUnavailable,
        Self::MissingUpload,
        Self::PayloadTooLarge,
        Self::BadRequest,
        Self::NotFound,
        Self::IdentityProviderUnavailable,
        Self::ConfigError,
        Self::Internal,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
