//! Tracing subscriber setup for embedders and tests
//!
//! The library itself only emits `tracing` events; initializing a subscriber
//! is left to the embedding application.

use tracing_subscriber::EnvFilter;

/// Initialize a formatted subscriber honoring `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Initialize a formatted subscriber with an explicit default filter.
pub fn init_with_filter(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .try_init();
}
