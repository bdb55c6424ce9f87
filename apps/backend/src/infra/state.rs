use std::sync::Arc;

use crate::adapters::FixedStorage;
use crate::auth::TokenVerifier;
use crate::config::DEFAULT_BODY_LIMIT;
use crate::repos::Storage;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    verifier: Option<Arc<dyn TokenVerifier>>,
    storage: Option<Arc<dyn Storage>>,
    version: String,
    body_limit: usize,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            verifier: None,
            storage: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_verifier(mut self, verifier: Option<Arc<dyn TokenVerifier>>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Storage defaults to [`FixedStorage`].
    pub fn build(self) -> AppState {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(FixedStorage::new()));
        AppState::new(self.verifier, storage, self.version, self.body_limit)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
