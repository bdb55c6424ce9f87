//! Bearer token helpers for tests.
//!
//! Tests run against the shared-secret verifier instead of Firebase.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use backend::auth::SharedSecretVerifier;
use backend::infra::state::build_state;
use backend::state::app_state::AppState;

pub const TEST_SECRET: &str = "order_helper_test_secret_for_testing_only";

pub fn test_verifier() -> SharedSecretVerifier {
    SharedSecretVerifier::new(TEST_SECRET)
}

/// State with the shared-secret verifier and the fixed storage adapter.
pub fn authenticated_state() -> AppState {
    build_state()
        .with_verifier(Some(Arc::new(test_verifier())))
        .build()
}

/// Bearer token string (without the "Bearer " prefix).
pub fn mint_test_token(sub: &str, email: Option<&str>) -> String {
    test_verifier()
        .mint(sub, email, SystemTime::now())
        .expect("should mint token successfully")
}

/// Full Authorization header value.
pub fn bearer_header(sub: &str, email: Option<&str>) -> String {
    format!("Bearer {}", mint_test_token(sub, email))
}

/// A token that expired well outside the validation leeway.
pub fn mint_expired_token(sub: &str) -> String {
    let past_time = SystemTime::now() - Duration::from_secs(7200);
    test_verifier()
        .mint(sub, None, past_time)
        .expect("should mint expired token successfully")
}
