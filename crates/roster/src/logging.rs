//! # Logging Setup
//!
//! Installs the global `tracing` subscriber for the server binary. Filter
//! precedence: `RUST_LOG`, then `--verbose` (debug for roster crates), then
//! the configured filter.

use tracing_subscriber::EnvFilter;

/// Filter directive used when `--verbose` is given.
pub const VERBOSE_FILTER: &str = "roster=debug,roster_core=debug,info";

/// Chooses the filter directive for the given settings.
///
/// `env` is the value of `RUST_LOG`, if set.
#[must_use]
pub fn filter_directive(env: Option<&str>, verbose: bool, configured: &str) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.to_owned(),
        _ if verbose => VERBOSE_FILTER.to_owned(),
        _ => configured.to_owned(),
    }
}

/// Installs a formatting subscriber writing to stderr.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(verbose: bool, configured: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(env.as_deref(), verbose, configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("invalid log filter {directive:?} ({err}), falling back to \"info\"");
        EnvFilter::new("info")
    });

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed, keeping it");
    }
}
