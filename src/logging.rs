//! Diagnostic logging bootstrap.
//!
//! # Responsibility
//! - Install a stderr `tracing` subscriber once per process.
//! - Pick the level from `RUST_LOG`, falling back to the CLI verbosity.
//!
//! # Invariants
//! - Initialization never panics; a second call is a no-op.
//! - User-facing output does not go through here; see [`crate::ui::output`].

use tracing_subscriber::EnvFilter;

use crate::ui::output::Verbosity;

/// Default filter directive for a verbosity level.
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Debug => "basalt_build=debug",
    }
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(verbosity: Verbosity) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
