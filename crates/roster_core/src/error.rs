//! # Roster Error Types
//!
//! Errors that can occur in the core. Lookups never error: a missing player is
//! `None`.

use thiserror::Error;

/// Errors that can occur in the roster core.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Encoding a player's public fields failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record cannot become a player.
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// Why the record was rejected.
        reason: String,
    },
}

/// Result type for roster core operations.
pub type RosterResult<T> = Result<T, RosterError>;
