//! # ROSTER
//!
//! The server crate around `roster_core`.
//!
//! ```text
//!  roster.toml ──> RosterConfig ──┐
//!                                 ▼
//!  SeedSource ──insert_all──> PlayerRegistry <──── workload threads
//!                                 │
//!                                 ▼
//!                     level_counts_excluding ──> report
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration with defaults
//! - `seed`: one-shot bulk load at startup
//! - `workload`: concurrent traversal and update driver
//! - `logging`: `tracing` subscriber setup
//! - `shutdown`: block until Ctrl-C

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod seed;
pub mod shutdown;
pub mod workload;

pub use roster_core as core;

pub use config::RosterConfig;
pub use error::{ServerError, ServerResult};
pub use seed::{BuiltinSeed, SeedSource, TomlSeedFile};
pub use workload::{Workload, WorkloadReport};
