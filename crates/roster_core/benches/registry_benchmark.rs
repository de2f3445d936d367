//! # Registry Performance Benchmark
//!
//! Measures the two lock tiers under the operations the server runs most:
//! - point lookups (registry shared lock)
//! - experience awards (player exclusive lock)
//! - snapshot and level aggregation (registry shared lock, every player lock)
//!
//! Run with: `cargo bench --package roster_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roster_core::{Player, PlayerRegistry};

/// Registry sizes to measure.
const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn populated(count: usize) -> PlayerRegistry {
    let registry = PlayerRegistry::with_capacity(count);
    registry.insert_all((0..count).map(|i| {
        let experience = (i % 5_000) as i64;
        Player::new(
            format!("uid_{i:06}"),
            if i % 10 == 0 { "John" } else { "npc" },
            roster_core::level_for_experience(experience),
            experience,
        )
    }));
    registry
}

/// Benchmark: point lookup.
fn bench_get(c: &mut Criterion) {
    let registry = populated(10_000);
    c.bench_function("get_10k", |b| {
        b.iter(|| black_box(registry.get(black_box("uid_004242"))));
    });
}

/// Benchmark: award experience through a looked-up handle.
fn bench_award(c: &mut Criterion) {
    let registry = populated(10_000);
    let player = registry.get("uid_000001").unwrap();
    c.bench_function("award_experience", |b| {
        b.iter(|| black_box(player.award_experience(black_box(10))));
    });
}

/// Benchmark: snapshot of the whole registry.
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for count in SIZES {
        let registry = populated(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(registry.snapshot().len()));
        });
    }
    group.finish();
}

/// Benchmark: level aggregation excluding one name.
fn bench_level_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_counts_excluding");
    for count in SIZES {
        let registry = populated(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(registry.level_counts_excluding("John")));
        });
    }
    group.finish();
}

/// Benchmark: aggregation while four threads hammer player locks.
fn bench_level_counts_contended(c: &mut Criterion) {
    let registry = Arc::new(populated(10_000));
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let player = registry.get(&format!("uid_{:06}", t * 7)).unwrap();
                while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                    player.award_experience(1);
                }
            })
        })
        .collect();

    c.bench_function("level_counts_contended_10k", |b| {
        b.iter(|| black_box(registry.level_counts_excluding("John")));
    });

    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    for w in writers {
        w.join().unwrap();
    }
}

criterion_group!(
    benches,
    bench_get,
    bench_award,
    bench_snapshot,
    bench_level_counts,
    bench_level_counts_contended,
);
criterion_main!(benches);
