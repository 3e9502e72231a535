//! Tracing subscriber setup for binaries and tests embedding rowmap.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `rowmap_storage=debug`.
pub const LOG_ENV: &str = "ROWMAP_LOG";

/// Install a fmt subscriber filtered by `ROWMAP_LOG`, falling back to `default_directive`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
