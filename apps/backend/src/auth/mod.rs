//! Bearer token authentication.
//!
//! `TokenVerifier` is the seam between request handling and the identity
//! provider. Two implementations ship: Firebase ID tokens (production) and
//! shared-secret HS256 tokens (local development and tests).

pub mod bearer;
pub mod firebase;
pub mod identity;
pub mod jwt;
pub mod keys;
pub mod verifier;

use std::sync::Arc;

use tracing::{info, warn};

pub use bearer::bearer_token;
pub use firebase::FirebaseVerifier;
pub use identity::Identity;
pub use jwt::SharedSecretVerifier;
pub use keys::{GoogleKeySource, KeySource, StaticKeySource};
pub use verifier::TokenVerifier;

use crate::config::IdentityProviderConfig;

/// Build the verifier selected by configuration.
///
/// Returns `None` when authentication is unavailable; protected routes then
/// answer 401 instead of the process refusing to start.
pub fn build_verifier(config: &IdentityProviderConfig) -> Option<Arc<dyn TokenVerifier>> {
    match config {
        IdentityProviderConfig::Firebase { project_id } => match GoogleKeySource::new() {
            Ok(keys) => {
                info!(project_id = %project_id, "Firebase token verification enabled");
                Some(Arc::new(FirebaseVerifier::new(project_id.clone(), Arc::new(keys))))
            }
            Err(e) => {
                warn!(error = %e, "Firebase key source could not be created; authenticated routes disabled");
                None
            }
        },
        IdentityProviderConfig::SharedSecret { secret } => {
            warn!("Shared-secret token verification enabled; do not use in production");
            Some(Arc::new(SharedSecretVerifier::new(secret.clone())))
        }
        IdentityProviderConfig::Disabled { reason } => {
            warn!(reason = %reason, "No identity provider configured; authenticated routes disabled");
            None
        }
    }
}
