//! Test logging initialization shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize test logging with the default `warn` filter.
///
/// Safe to call from every test; only the first call installs a subscriber.
/// The filter is taken from `TEST_LOG`, then `RUST_LOG`, then the default.
pub fn init() {
    init_with_default("warn");
}

/// Same as [`init`] but with a caller-chosen fallback directive.
pub fn init_with_default(default_directive: &str) {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        // try_init: another harness may already own the global subscriber
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
