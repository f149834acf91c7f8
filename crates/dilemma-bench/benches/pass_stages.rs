//! Criterion micro-benchmarks for the individual pass stages.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dilemma_backend::{Backend, CpuBackend, ReplicatorParams};
use dilemma_bench::{checkerboard, reference_shape};
use dilemma_core::{Neighborhood, PayoffMatrix};

/// Benchmark: count cooperators across 8 worlds of 100x100.
fn bench_count_80k(c: &mut Criterion) {
    let backend = CpuBackend::new();
    let shape = reference_shape();
    let lattice = checkerboard(shape);
    let mut counts = vec![0u32; shape.worlds()];

    c.bench_function("count_80k", |b| {
        b.iter(|| {
            backend
                .count_cooperators(lattice.cells(), shape, &mut counts)
                .unwrap();
            black_box(&counts);
        });
    });
}

/// Benchmark: accumulate Moore-neighborhood payoffs for 80K cells.
fn bench_play_moore_80k(c: &mut Criterion) {
    let backend = CpuBackend::new();
    let shape = reference_shape();
    let lattice = checkerboard(shape);
    let payoff = PayoffMatrix::new(10.0, 7.0, 0.0, 0.0);
    let mut rewards = vec![0.0f32; shape.total_cells()];

    c.bench_function("play_moore_80k", |b| {
        b.iter(|| {
            backend
                .compute_rewards(
                    lattice.cells(),
                    shape,
                    Neighborhood::Moore,
                    &payoff,
                    &mut rewards,
                )
                .unwrap();
            black_box(&rewards);
        });
    });
}

/// Benchmark: best-response update for 80K cells.
fn bench_update_best_80k(c: &mut Criterion) {
    let backend = CpuBackend::new();
    let shape = reference_shape();
    let lattice = checkerboard(shape);
    let payoff = PayoffMatrix::new(10.0, 7.0, 0.0, 0.0);
    let mut rewards = vec![0.0f32; shape.total_cells()];
    backend
        .compute_rewards(
            lattice.cells(),
            shape,
            Neighborhood::Moore,
            &payoff,
            &mut rewards,
        )
        .unwrap();
    let mut next = vec![0u8; shape.total_cells()];

    c.bench_function("update_best_80k", |b| {
        b.iter(|| {
            backend
                .update_best(
                    lattice.cells(),
                    &rewards,
                    shape,
                    Neighborhood::Moore,
                    &mut next,
                )
                .unwrap();
            black_box(&next);
        });
    });
}

/// Benchmark: replicator update for 80K cells with fixed draws.
fn bench_update_replicator_80k(c: &mut Criterion) {
    let backend = CpuBackend::new();
    let shape = reference_shape();
    let lattice = checkerboard(shape);
    let payoff = PayoffMatrix::new(10.0, 7.0, 0.0, 0.0);
    let mut rewards = vec![0.0f32; shape.total_cells()];
    backend
        .compute_rewards(
            lattice.cells(),
            shape,
            Neighborhood::Moore,
            &payoff,
            &mut rewards,
        )
        .unwrap();
    let params = ReplicatorParams {
        dp_max: payoff.dp_max(),
        mutation_threshold: 1e-3,
    };
    // Deterministic pseudo-random draws in [0, 1).
    let draws: Vec<f32> = (0..shape.total_cells() as u64)
        .map(|i| (i.wrapping_mul(6364136223846793007) % 1_000_000) as f32 / 1_000_000.0)
        .collect();
    let mut next = vec![0u8; shape.total_cells()];

    c.bench_function("update_replicator_80k", |b| {
        b.iter(|| {
            backend
                .update_replicator(
                    lattice.cells(),
                    &rewards,
                    shape,
                    Neighborhood::Moore,
                    params,
                    &draws,
                    &draws,
                    &mut next,
                )
                .unwrap();
            black_box(&next);
        });
    });
}

criterion_group!(
    benches,
    bench_count_80k,
    bench_play_moore_80k,
    bench_update_best_80k,
    bench_update_replicator_80k
);
criterion_main!(benches);
