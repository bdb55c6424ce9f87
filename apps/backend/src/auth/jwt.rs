//! Shared-secret (HS256) tokens.
//!
//! Used for local development when no Firebase project is available, and by
//! the test suite to mint tokens the server will accept.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::verifier::{map_jwt_error, TokenVerifier};
use crate::AppError;

/// Lifetime of minted tokens.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    iat: i64,
    exp: i64,
}

/// Verifies HS256 tokens signed with a shared secret.
#[derive(Clone)]
pub struct SharedSecretVerifier {
    secret: Vec<u8>,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Mint a token for `sub` valid for [`ACCESS_TOKEN_TTL_SECS`] from `now`.
    pub fn mint(&self, sub: &str, email: Option<&str>, now: SystemTime) -> Result<String, AppError> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AppError::internal("Failed to get current time"))?
            .as_secs() as i64;

        let claims = Claims {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            iat,
            exp: iat + ACCESS_TOKEN_TTL_SECS,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }
}

impl std::fmt::Debug for SharedSecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretVerifier").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenVerifier for SharedSecretVerifier {
    fn provider(&self) -> &'static str {
        "shared_secret"
    }

    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        // Validation::new pins the algorithm and checks exp.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map_err(|e| map_jwt_error(&e))?
            .claims;

        if claims.sub.is_empty() {
            return Err(AppError::unauthorized_invalid_token());
        }

        Ok(Identity {
            sub: claims.sub,
            email: claims.email,
            iat: claims.iat,
            exp: claims.exp,
        })
    }
}
