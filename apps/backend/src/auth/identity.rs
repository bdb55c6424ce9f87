//! Caller identity produced by token verification.

use serde::{Deserialize, Serialize};

/// Decoded identity of an authenticated caller.
///
/// Inserted into request extensions by `RequireIdentity` and discarded with
/// the request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Identity provider user id
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Identity {
    /// Email for log lines; tokens without an email claim log as `-`.
    pub fn email_or_dash(&self) -> &str {
        self.email.as_deref().unwrap_or("-")
    }
}
