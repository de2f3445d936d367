//! # Player Registry
//!
//! Identifier-keyed collection of players guarded by one `RwLock` (the
//! coarse-grained tier). The registry lock protects membership only: which
//! ids map to which players. Player fields are protected by each player's own
//! lock, which the registry never takes on a caller's behalf.
//!
//! ## Lock Levels Per Operation
//!
//! | Operation           | Registry lock        | Held while callbacks run |
//! |---------------------|----------------------|--------------------------|
//! | `get`/`contains`/`len` | shared            | -                        |
//! | `insert_all`        | exclusive            | -                        |
//! | `snapshot`          | shared               | -                        |
//! | `for_each_read`     | shared, whole walk   | yes                      |
//! | `filter_map_reduce` | shared, until reduce returns | yes              |
//!
//! While a traversal callback runs the thread holds the registry's shared
//! lock and no player lock. The callback may lock any player through the
//! `Player` API and may call `get`/`contains`/`len`, but must not call
//! `insert_all` on the same registry. Other registries are independent locks
//! and may be read or written from the callback. A long callback delays every
//! pending insertion.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::lock_order::{self, RegistryLockScope};
use crate::player::{Player, PlayerId};
use crate::query::{self, LevelCounts};

type Members = HashMap<PlayerId, Arc<Player>>;

/// Outcome of one [`PlayerRegistry::insert_all`] batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertSummary {
    /// Ids that were not present before the batch.
    pub added: usize,
    /// Ids whose previous player was replaced.
    pub replaced: usize,
}

/// Concurrent registry of players.
///
/// Construct one and share it (`&PlayerRegistry` or `Arc<PlayerRegistry>`)
/// with every collaborator; there is no global instance.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: RwLock<Members>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with room for `capacity` players.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            players: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Looks up a player.
    ///
    /// The returned handle stays valid after the registry lock is released,
    /// and after the entry is overwritten by a later `insert_all`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Player>> {
        self.shared().get(id).cloned()
    }

    /// Returns true if a player with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.shared().contains_key(id)
    }

    /// Number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared().len()
    }

    /// Returns true if no player is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared().is_empty()
    }

    /// Inserts players, replacing any entry with the same id.
    ///
    /// The whole batch is applied under one exclusive acquisition, so other
    /// threads see either none or all of it. Handles to replaced players
    /// remain usable but are no longer reachable from the registry.
    ///
    /// # Panics
    ///
    /// With debug assertions, panics if called while the current thread holds
    /// a player lock or the registry lock.
    pub fn insert_all<I, P>(&self, players: I) -> InsertSummary
    where
        I: IntoIterator<Item = P>,
        P: Into<Arc<Player>>,
    {
        // Caller iterators run before the lock is taken.
        let incoming: Vec<Arc<Player>> = players.into_iter().map(Into::into).collect();

        let mut summary = InsertSummary::default();
        let total = {
            let mut members = self.exclusive();
            members.reserve(incoming.len());
            for player in incoming {
                match members.insert(player.id().clone(), player) {
                    Some(_) => summary.replaced += 1,
                    None => summary.added += 1,
                }
            }
            members.len()
        };

        tracing::debug!(
            added = summary.added,
            replaced = summary.replaced,
            total,
            "players inserted"
        );
        summary
    }

    /// Calls `f` on every player while holding the registry's shared lock.
    ///
    /// Visiting order is unspecified. `f` is responsible for locking each
    /// player through the `Player` API; it may mutate players.
    pub fn for_each_read<F>(&self, mut f: F)
    where
        F: FnMut(&Arc<Player>),
    {
        let members = self.shared();
        for player in members.values() {
            f(player);
        }
    }

    /// Returns a handle to every registered player.
    ///
    /// The vector has exactly one element per entry at the moment of the call,
    /// in unspecified order. The handles point at the live players, not at
    /// copies of their fields.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<Player>> {
        self.shared().values().cloned().collect()
    }

    /// Filter, map and reduce over all players under one shared acquisition.
    ///
    /// For each player (unspecified order) `filter` decides inclusion and
    /// `mapper` produces an intermediate value. `reducer` is then called once
    /// with every intermediate value, possibly none, and its result is
    /// returned. The registry lock is released only after `reducer` returns,
    /// so no insertion can interleave with the aggregation.
    ///
    /// `filter` and `mapper` must lock players themselves (through the
    /// `Player` API) when they read mutable fields.
    pub fn filter_map_reduce<R, A, F, M, Rd>(&self, mut filter: F, mut mapper: M, reducer: Rd) -> A
    where
        F: FnMut(&Player) -> bool,
        M: FnMut(&Player) -> R,
        Rd: FnOnce(Vec<R>) -> A,
    {
        let members = self.shared();
        let mut mapped = Vec::new();
        for player in members.values() {
            if filter(player) {
                mapped.push(mapper(player));
            }
        }
        let result = reducer(mapped);
        drop(members);
        result
    }

    /// Counts players per level, skipping those named `display_name`.
    #[must_use]
    pub fn level_counts_excluding(&self, display_name: &str) -> LevelCounts {
        self.filter_map_reduce(
            query::excluding_display_name(display_name),
            query::level_tally,
            query::count_by_level,
        )
    }

    /// Takes the registry lock in shared mode.
    ///
    /// Nested acquisitions on a thread that already holds this registry's
    /// lock use a recursive read, which cannot queue behind a waiting writer.
    fn shared(&self) -> SharedMembers<'_> {
        let nested = lock_order::holds_registry(self.lock_key());
        let scope = RegistryLockScope::shared(self.lock_key());
        let members = if nested {
            self.players.read_recursive()
        } else {
            self.players.read()
        };
        SharedMembers {
            members,
            _scope: scope,
        }
    }

    /// Takes the registry lock in exclusive mode.
    fn exclusive(&self) -> ExclusiveMembers<'_> {
        let scope = RegistryLockScope::exclusive(self.lock_key());
        ExclusiveMembers {
            members: self.players.write(),
            _scope: scope,
        }
    }

    /// Identity of this registry's lock in the lock-order ledger.
    #[inline]
    fn lock_key(&self) -> usize {
        std::ptr::addr_of!(self.players) as usize
    }
}

/// Shared registry guard. Field order releases the lock before the ledger.
struct SharedMembers<'a> {
    members: RwLockReadGuard<'a, Members>,
    _scope: RegistryLockScope,
}

impl Deref for SharedMembers<'_> {
    type Target = Members;

    fn deref(&self) -> &Members {
        &self.members
    }
}

/// Exclusive registry guard. Field order releases the lock before the ledger.
struct ExclusiveMembers<'a> {
    members: RwLockWriteGuard<'a, Members>,
    _scope: RegistryLockScope,
}

impl Deref for ExclusiveMembers<'_> {
    type Target = Members;

    fn deref(&self) -> &Members {
        &self.members
    }
}

impl DerefMut for ExclusiveMembers<'_> {
    fn deref_mut(&mut self) -> &mut Members {
        &mut self.members
    }
}
