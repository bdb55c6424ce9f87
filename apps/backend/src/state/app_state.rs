use std::fmt;
use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::repos::Storage;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no identity provider is configured; protected routes
    /// then answer 401 `AUTH_UNAVAILABLE`.
    pub verifier: Option<Arc<dyn TokenVerifier>>,
    pub storage: Arc<dyn Storage>,
    /// Reported by `/health` and the root banner
    pub version: String,
    /// Maximum request body size for JSON and multipart bodies
    pub body_limit: usize,
}

impl AppState {
    pub fn new(
        verifier: Option<Arc<dyn TokenVerifier>>,
        storage: Arc<dyn Storage>,
        version: impl Into<String>,
        body_limit: usize,
    ) -> Self {
        Self {
            verifier,
            storage,
            version: version.into(),
            body_limit,
        }
    }

    pub fn verifier(&self) -> Option<&Arc<dyn TokenVerifier>> {
        self.verifier.as_ref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field(
                "verifier",
                &self.verifier.as_ref().map(|v| v.provider()),
            )
            .field("version", &self.version)
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}
