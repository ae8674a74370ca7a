//! Log output for the runner binary.
//!
//! The engine crates log through the `log` facade; `tracing-subscriber`
//! picks those records up through its `tracing-log` bridge.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` selects the filter (default: `info`), for example
/// `RUST_LOG=packit_d3=trace`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Installs a verbose subscriber for tests. Safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
