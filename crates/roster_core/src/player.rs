//! # Player Records
//!
//! A player is a mutable record guarded by its own `RwLock` (the fine-grained
//! tier). The identifier is fixed at construction and readable without a
//! lock; every other field lives in [`PlayerState`] behind the lock.
//!
//! ## Consistency
//!
//! Each accessor and setter takes the lock once, so two setter calls are two
//! separate critical sections. A reader may observe the state between them.
//! Anything that has to change several fields together goes through
//! [`Player::update`]:
//!
//! ```rust
//! use roster_core::{level_for_experience, Player};
//!
//! let player = Player::new("uid_001", "king", 1, 100);
//! player.update(|state| {
//!     state.experience += 10;
//!     state.level = level_for_experience(state.experience);
//! });
//! assert_eq!(player.level(), 1);
//! ```

use std::borrow::Borrow;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::RosterResult;
use crate::lock_order::PlayerLockScope;
use crate::wire::{self, PlayerRecord};

/// Experience required per level.
pub const EXPERIENCE_PER_LEVEL: i64 = 100;

/// Level implied by an experience total (`experience / EXPERIENCE_PER_LEVEL`).
///
/// Saturates at the `i32` bounds.
#[inline]
#[must_use]
pub fn level_for_experience(experience: i64) -> i32 {
    let level = experience / EXPERIENCE_PER_LEVEL;
    i32::try_from(level).unwrap_or(if level < 0 { i32::MIN } else { i32::MAX })
}

/// Unique identifier of a player within a registry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The lock-protected fields of a player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// Name shown to other players.
    pub display_name: String,
    /// Current level. Kept equal to `experience / 100` by convention only.
    pub level: i32,
    /// Experience total. Never decreases by convention.
    pub experience: i64,
    /// Server-side data. Never serialized.
    pub internal_data: String,
}

impl PlayerState {
    /// Adds experience and recomputes the level from the new total.
    #[inline]
    pub fn award_experience(&mut self, amount: i64) {
        self.experience = self.experience.saturating_add(amount);
        self.level = level_for_experience(self.experience);
    }
}

/// A player record with its own lock.
///
/// Shared between threads as `Arc<Player>`; all methods take `&self`.
#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    state: RwLock<PlayerState>,
}

impl Player {
    /// Creates a player. `internal_data` starts empty.
    #[must_use]
    pub fn new(
        id: impl Into<PlayerId>,
        display_name: impl Into<String>,
        level: i32,
        experience: i64,
    ) -> Self {
        Self {
            id: id.into(),
            state: RwLock::new(PlayerState {
                display_name: display_name.into(),
                level,
                experience,
                internal_data: String::new(),
            }),
        }
    }

    /// Returns the identifier. Takes no lock.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Runs `f` with shared access to the state.
    ///
    /// The player's lock is held in shared mode while `f` runs. `f` must not
    /// call into this player, any other player or any `PlayerRegistry`.
    /// Player locks never nest; work across players takes them one at a time.
    pub fn read<R>(&self, f: impl FnOnce(&PlayerState) -> R) -> R {
        let _scope = PlayerLockScope::enter(self.lock_key());
        let state = self.state.read();
        f(&state)
    }

    /// Runs `f` with exclusive access to the state.
    ///
    /// The player's lock is held in exclusive mode while `f` runs, so every
    /// change `f` makes becomes visible to other threads at once. `f` must not
    /// call into this player, any other player or any `PlayerRegistry`.
    pub fn update<R>(&self, f: impl FnOnce(&mut PlayerState) -> R) -> R {
        let _scope = PlayerLockScope::enter(self.lock_key());
        let mut state = self.state.write();
        f(&mut state)
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.read(|state| state.display_name.clone())
    }

    /// Returns the level.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.read(|state| state.level)
    }

    /// Returns the experience total.
    #[must_use]
    pub fn experience(&self) -> i64 {
        self.read(|state| state.experience)
    }

    /// Returns the server-side data.
    #[must_use]
    pub fn internal_data(&self) -> String {
        self.read(|state| state.internal_data.clone())
    }

    /// Overwrites the display name.
    pub fn set_display_name(&self, display_name: impl Into<String>) {
        let display_name = display_name.into();
        self.update(|state| state.display_name = display_name);
    }

    /// Overwrites the level. Does not touch experience.
    pub fn set_level(&self, level: i32) {
        self.update(|state| state.level = level);
    }

    /// Overwrites the experience total. Does not touch the level.
    pub fn set_experience(&self, experience: i64) {
        self.update(|state| state.experience = experience);
    }

    /// Overwrites the server-side data.
    pub fn set_internal_data(&self, internal_data: impl Into<String>) {
        let internal_data = internal_data.into();
        self.update(|state| state.internal_data = internal_data);
    }

    /// Adds experience and recomputes the level in one critical section.
    ///
    /// Returns the new `(level, experience)`.
    pub fn award_experience(&self, amount: i64) -> (i32, i64) {
        self.update(|state| {
            state.award_experience(amount);
            (state.level, state.experience)
        })
    }

    /// Copies the public fields under one shared lock.
    #[must_use]
    pub fn record(&self) -> PlayerRecord {
        self.read(|state| PlayerRecord::from_state(&self.id, state))
    }

    /// Encodes the public fields.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn try_to_api(&self) -> RosterResult<Vec<u8>> {
        self.read(|state| wire::encode(&self.id, state))
    }

    /// Encodes the public fields, or returns an empty vector if encoding fails.
    ///
    /// An empty result means "serialization unavailable", never valid output.
    #[must_use]
    pub fn to_api(&self) -> Vec<u8> {
        match self.try_to_api() {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(player = %self.id, error = %err, "player serialization failed");
                Vec::new()
            }
        }
    }

    /// Identity of this player's lock in the lock-order ledger.
    #[inline]
    fn lock_key(&self) -> usize {
        std::ptr::addr_of!(self.state) as usize
    }
}
