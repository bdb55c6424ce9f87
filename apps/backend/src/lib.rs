#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use adapters::FixedStorage;
pub use auth::{build_verifier, Identity, SharedSecretVerifier, TokenVerifier};
pub use config::{AppConfig, IdentityProviderConfig, OriginAllowlist};
pub use error::AppError;
pub use extractors::{CurrentIdentity, JsonOrDefault};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::{
    OriginPolicy, RequestTrace, RequireIdentity, SecurityHeaders, StructuredLogger, TraceSpan,
};
pub use repos::Storage;
pub use state::app_state::AppState;

