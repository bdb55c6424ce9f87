use async_trait::async_trait;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

use super::identity::Identity;
use crate::AppError;

/// Validates a bearer token against an identity provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Short provider name for logs.
    fn provider(&self) -> &'static str;

    /// Verify `token` and return the caller's identity.
    ///
    /// Rejections are `Unauthorized` errors; failing to reach the provider
    /// is `ProviderUnavailable`.
    async fn verify(&self, token: &str) -> Result<Identity, AppError>;
}

/// Map a `jsonwebtoken` decode failure onto the invalid/expired split.
pub(crate) fn map_jwt_error(e: &JwtError) -> AppError {
    match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_token(),
        _ => AppError::unauthorized_invalid_token(),
    }
}
