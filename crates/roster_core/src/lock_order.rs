//! # Lock-Order Checking
//!
//! Runtime enforcement of the acquisition order between the two lock tiers:
//!
//! ```text
//! registry R (shared)  -> player (shared | exclusive)     OK
//! registry R (shared)  -> registry R (shared)             OK (recursive read)
//! registry R (any)     -> registry S (any)                OK
//! player (any)         -> registry (any)                  VIOLATION
//! registry R (any)     -> registry R (exclusive)          VIOLATION (self-deadlock)
//! player A (any)       -> player A (any)                  VIOLATION (self-deadlock)
//! player A (any)       -> player B (any)                  VIOLATION (A->B / B->A deadlock)
//! ```
//!
//! Every acquisition in this crate goes through a scope guard that records the
//! lock, keyed by its address, in a thread-local ledger for as long as the
//! guard lives. Violations panic before the real lock is requested, in builds
//! with debug assertions. Release builds keep the ledger but skip the checks.

use std::cell::RefCell;

thread_local! {
    /// Addresses of the players whose lock this thread currently holds.
    static HELD_PLAYERS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    /// Addresses of the registry locks this thread holds, one entry per
    /// acquisition.
    static HELD_REGISTRIES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Diagnostics: number of player locks the current thread holds.
///
/// Zero whenever the thread is outside every `Player::read`/`update`.
#[must_use]
pub fn player_locks_held() -> usize {
    HELD_PLAYERS.with(|held| held.borrow().len())
}

/// Diagnostics: number of registry acquisitions the current thread holds,
/// summed over all registries.
///
/// Zero whenever the thread is outside every registry operation.
#[must_use]
pub fn registry_locks_held() -> usize {
    HELD_REGISTRIES.with(|held| held.borrow().len())
}

/// Returns true if this thread holds the registry lock at `key`.
pub(crate) fn holds_registry(key: usize) -> bool {
    HELD_REGISTRIES.with(|held| held.borrow().contains(&key))
}

fn release(ledger: &'static std::thread::LocalKey<RefCell<Vec<usize>>>, key: usize) {
    ledger.with(|held| {
        let mut held = held.borrow_mut();
        if let Some(pos) = held.iter().rposition(|&k| k == key) {
            held.remove(pos);
        }
    });
}

/// Ledger entry for one held player lock.
pub(crate) struct PlayerLockScope {
    key: usize,
}

impl PlayerLockScope {
    /// Records that the current thread is about to lock the player at `key`.
    ///
    /// # Panics
    ///
    /// With debug assertions, panics if this thread already holds any player
    /// lock, that player's or another's.
    pub(crate) fn enter(key: usize) -> Self {
        HELD_PLAYERS.with(|held| {
            let mut held = held.borrow_mut();
            debug_assert!(
                !held.contains(&key),
                "lock order violation: player lock re-entered on the same thread"
            );
            debug_assert!(
                held.is_empty(),
                "lock order violation: player lock requested while holding another player lock"
            );
            held.push(key);
        });
        Self { key }
    }
}

impl Drop for PlayerLockScope {
    fn drop(&mut self) {
        release(&HELD_PLAYERS, self.key);
    }
}

/// Ledger entry for one held registry lock.
pub(crate) struct RegistryLockScope {
    key: usize,
}

impl RegistryLockScope {
    /// Records a shared acquisition of the registry lock at `key`.
    ///
    /// # Panics
    ///
    /// With debug assertions, panics if this thread holds any player lock.
    pub(crate) fn shared(key: usize) -> Self {
        debug_assert!(
            player_locks_held() == 0,
            "lock order violation: registry lock requested while holding a player lock"
        );
        Self::push(key)
    }

    /// Records an exclusive acquisition of the registry lock at `key`.
    ///
    /// # Panics
    ///
    /// With debug assertions, panics if this thread holds any player lock or
    /// already holds this registry's lock.
    pub(crate) fn exclusive(key: usize) -> Self {
        debug_assert!(
            player_locks_held() == 0,
            "lock order violation: registry lock requested while holding a player lock"
        );
        debug_assert!(
            !holds_registry(key),
            "lock order violation: exclusive registry lock requested while already holding the registry lock"
        );
        Self::push(key)
    }

    fn push(key: usize) -> Self {
        HELD_REGISTRIES.with(|held| held.borrow_mut().push(key));
        Self { key }
    }
}

impl Drop for RegistryLockScope {
    fn drop(&mut self) {
        release(&HELD_REGISTRIES, self.key);
    }
}
