//! # ROSTER Core
//!
//! Concurrent in-memory registry of mutable player records, safe for any
//! number of simultaneous readers and writers on independent threads.
//!
//! ## Two Lock Tiers
//!
//! ```text
//!   ┌──────────────────────────────────────────────┐
//!   │ PlayerRegistry    RwLock<HashMap<Id, Arc<P>>> │  coarse: membership
//!   └──────────────┬───────────────────────────────┘
//!                  │ may be held while taking ▼
//!   ┌──────────────┴───────┐ ┌──────────────────────┐
//!   │ Player  RwLock<State>│ │ Player  RwLock<State>│  fine: fields
//!   └──────────────────────┘ └──────────────────────┘
//! ```
//!
//! 1. **Registry → Player only** - a thread holding a player lock never takes
//!    the registry lock. Debug builds check this at runtime (`lock_order`).
//! 2. **Independent domains** - mutating two different players runs fully in
//!    parallel; the registry lock orders membership changes only. Player
//!    locks never nest inside each other.
//! 3. **Multi-field updates go through `Player::update`** - setters are single
//!    field and give no cross-field consistency.
//!
//! ## Example
//!
//! ```rust
//! use roster_core::{Player, PlayerRegistry};
//!
//! let registry = PlayerRegistry::new();
//! registry.insert_all([
//!     Player::new("uid_001", "king", 1, 100),
//!     Player::new("uid_004", "John", 1, 120),
//! ]);
//!
//! if let Some(king) = registry.get("uid_001") {
//!     king.award_experience(10);
//! }
//!
//! let counts = registry.level_counts_excluding("John");
//! assert_eq!(counts.get(&1), Some(&1));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod lock_order;
pub mod player;
pub mod query;
pub mod registry;
pub mod wire;

pub use error::{RosterError, RosterResult};
pub use player::{level_for_experience, Player, PlayerId, PlayerState, EXPERIENCE_PER_LEVEL};
pub use query::LevelCounts;
pub use registry::{InsertSummary, PlayerRegistry};
pub use wire::PlayerRecord;
