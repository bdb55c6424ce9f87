//! Firebase Authentication ID token verification.
//!
//! Checks performed, matching Firebase's documented requirements:
//! - header `alg` is RS256 and `kid` names a current Google signing key
//! - `aud` is the project id and `iss` is `https://securetoken.google.com/<project id>`
//! - `exp` is in the future and `iat` and `auth_time` are not, with a small
//!   clock skew allowance
//! - `sub` is a non-empty string

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use tracing::debug;

use super::identity::Identity;
use super::keys::KeySource;
use super::verifier::{map_jwt_error, TokenVerifier};
use crate::AppError;

/// Allowed clock skew, in seconds.
pub const CLOCK_SKEW_SECS: u64 = 60;

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    iat: i64,
    exp: i64,
    auth_time: i64,
}

pub struct FirebaseVerifier {
    project_id: String,
    issuer: String,
    keys: Arc<dyn KeySource>,
}

impl FirebaseVerifier {
    pub fn new(project_id: impl Into<String>, keys: Arc<dyn KeySource>) -> Self {
        let project_id = project_id.into();
        let issuer = format!("{ISSUER_PREFIX}{project_id}");
        Self {
            project_id,
            issuer,
            keys,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);
        validation.leeway = CLOCK_SKEW_SECS;
        validation
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    fn provider(&self) -> &'static str {
        "firebase"
    }

    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "undecodable token header");
            AppError::unauthorized_invalid_token()
        })?;

        if header.alg != Algorithm::RS256 {
            debug!(alg = ?header.alg, "unexpected token algorithm");
            return Err(AppError::unauthorized_invalid_token());
        }

        let kid = header
            .kid
            .ok_or_else(AppError::unauthorized_invalid_token)?;

        let key = self.keys.decoding_key(&kid).await?.ok_or_else(|| {
            debug!(kid = %kid, "token signed with unknown key");
            AppError::unauthorized_invalid_token()
        })?;

        let claims = decode::<FirebaseClaims>(token, &key, &self.validation())
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                map_jwt_error(&e)
            })?
            .claims;

        if claims.sub.is_empty() {
            return Err(AppError::unauthorized_invalid_token());
        }
        let latest = now_secs() + CLOCK_SKEW_SECS as i64;
        if claims.iat > latest {
            debug!(iat = claims.iat, "token issued in the future");
            return Err(AppError::unauthorized_invalid_token());
        }
        if claims.auth_time > latest {
            debug!(auth_time = claims.auth_time, "user authenticated in the future");
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
