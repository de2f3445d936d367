//! # Concurrent Workload
//!
//! Drives the registry from many threads at once. Each round spawns three
//! jobs:
//!
//! ```text
//! traverse   for_each_read: serialize every player, award experience to it
//! pin        get(pinned) then set_experience(pinned_experience)
//! award      get(pinned) then award_experience(award)
//! ```
//!
//! All rounds run concurrently on scoped threads; `run` returns after every
//! job has finished. The `pin` job writes experience without touching the
//! level, so the pinned player's level is only re-derived by the next award.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use roster_core::PlayerRegistry;

use crate::config::WorkloadConfig;

/// Counters from one workload run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkloadReport {
    /// Completed traversal jobs.
    pub traversals: usize,
    /// Successful lookups of the pinned player (both job kinds).
    pub pinned_updates: usize,
    /// Lookups of the pinned player that found nothing.
    pub missing_lookups: usize,
    /// Total bytes produced by serialization during traversals.
    pub bytes_serialized: usize,
    /// Serializations that returned an empty result.
    pub empty_serializations: usize,
    /// Wall time in microseconds.
    pub elapsed_us: u64,
}

#[derive(Default)]
struct Counters {
    traversals: AtomicUsize,
    pinned_updates: AtomicUsize,
    missing_lookups: AtomicUsize,
    bytes_serialized: AtomicUsize,
    empty_serializations: AtomicUsize,
}

/// The workload driver.
pub struct Workload<'a> {
    registry: &'a PlayerRegistry,
    config: &'a WorkloadConfig,
}

impl<'a> Workload<'a> {
    /// Creates a driver over `registry`.
    #[must_use]
    pub fn new(registry: &'a PlayerRegistry, config: &'a WorkloadConfig) -> Self {
        Self { registry, config }
    }

    /// Runs every round and waits for all jobs.
    ///
    /// # Panics
    ///
    /// Propagates a panic from any job thread.
    #[must_use]
    pub fn run(&self) -> WorkloadReport {
        let start = Instant::now();
        let counters = Counters::default();

        thread::scope(|scope| {
            for _ in 0..self.config.workers {
                scope.spawn(|| self.traverse(&counters));
                scope.spawn(|| self.pin(&counters));
                scope.spawn(|| self.award(&counters));
            }
        });

        let report = WorkloadReport {
            traversals: counters.traversals.into_inner(),
            pinned_updates: counters.pinned_updates.into_inner(),
            missing_lookups: counters.missing_lookups.into_inner(),
            bytes_serialized: counters.bytes_serialized.into_inner(),
            empty_serializations: counters.empty_serializations.into_inner(),
            elapsed_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        };

        tracing::debug!(
            traversals = report.traversals,
            pinned_updates = report.pinned_updates,
            missing_lookups = report.missing_lookups,
            elapsed_us = report.elapsed_us,
            "workload finished"
        );
        report
    }

    fn traverse(&self, counters: &Counters) {
        let award = self.config.award;
        self.registry.for_each_read(|player| {
            let bytes = player.to_api();
            if bytes.is_empty() {
                counters.empty_serializations.fetch_add(1, Ordering::Relaxed);
            } else {
                counters
                    .bytes_serialized
                    .fetch_add(bytes.len(), Ordering::Relaxed);
            }
            player.award_experience(award);
        });
        counters.traversals.fetch_add(1, Ordering::Relaxed);
    }

    fn pin(&self, counters: &Counters) {
        match self.registry.get(&self.config.pinned_player) {
            Some(player) => {
                player.set_experience(self.config.pinned_experience);
                counters.pinned_updates.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                counters.missing_lookups.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn award(&self, counters: &Counters) {
        match self.registry.get(&self.config.pinned_player) {
            Some(player) => {
                player.award_experience(self.config.award);
                counters.pinned_updates.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                counters.missing_lookups.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
