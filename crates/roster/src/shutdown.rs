//! # Shutdown
//!
//! Blocks the calling thread until the process receives an interrupt.

use crate::error::{ServerError, ServerResult};

/// Waits for Ctrl-C / SIGINT.
///
/// Builds a single-threaded `tokio` runtime for the signal listener only.
///
/// # Errors
///
/// Returns [`ServerError::Runtime`] if the runtime or the signal handler
/// cannot be set up.
pub fn wait_for_interrupt() -> ServerResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    runtime
        .block_on(tokio::signal::ctrl_c())
        .map_err(ServerError::Runtime)
}
