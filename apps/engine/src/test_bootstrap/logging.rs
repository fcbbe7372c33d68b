#![cfg(test)]

//! Test logging for the engine's unit tests.
//!
//! Installed once per test binary by the `ctor` hook in `lib.rs`. Integration
//! tests use the same initializer from the `engine-test-support` package.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent. The filter is read from `TEST_LOG`, then `RUST_LOG`, and
/// defaults to `warn` so test output stays quiet.
///
/// ```bash
/// TEST_LOG=engine=debug cargo test -p engine
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
