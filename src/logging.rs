//! Subscriber setup for hosts that want the crate's diagnostics.
//!
//! Only [`RingHandle`](crate::handle::RingHandle) lifecycle events are
//! logged; the per-base paths stay silent.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Installs a global compact `fmt` subscriber filtered by `RUST_LOG`,
/// defaulting to `warn`.
///
/// Returns `false` if a global subscriber was already installed.
///
/// ```rust,no_run
/// // RUST_LOG=kmerring=debug
/// kmerring::logging::init_tracing();
/// ```
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}
