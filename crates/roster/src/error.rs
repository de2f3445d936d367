//! # Server Error Types

use std::path::PathBuf;

use roster_core::RosterError;
use thiserror::Error;

/// Errors that can occur in the server crate.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Reading a file failed.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A TOML file is malformed.
    #[error("cannot parse {path}: {source}")]
    ConfigParse {
        /// The file being parsed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A core operation failed.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// The interrupt wait could not be set up.
    #[error("runtime error: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
