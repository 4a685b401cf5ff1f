//! Idempotent tracing setup for tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn,sqlx=error,sea_orm=error";

/// Install a test subscriber once per process.
///
/// Filter precedence: `TEST_LOG`, then `RUST_LOG`, then a quiet default.
/// Output goes through the libtest writer so it is captured per test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
