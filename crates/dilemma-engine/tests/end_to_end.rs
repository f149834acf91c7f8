//! Full-run behavior of the engine with the CPU backend.

use std::sync::Arc;

use dilemma_backend::CpuBackend;
use dilemma_core::{BatchShape, Neighborhood, PayoffMatrix, Strategy, UpdateRule};
use dilemma_engine::{ConfigError, Engine, EngineConfig, RunError, RunSpec};
use dilemma_lattice::LatticeBatch;
use proptest::prelude::*;

fn engine(config: EngineConfig) -> Engine {
    Engine::new(config, Arc::new(CpuBackend::new())).unwrap()
}

// ── fixed points ──────────────────────────────────────────────

fn scenario_config() -> EngineConfig {
    EngineConfig {
        payoff: PayoffMatrix::new(10.0, 7.0, 3.0, 0.0),
        ..EngineConfig::default()
    }
}

#[test]
fn all_cooperate_is_a_best_response_fixed_point() {
    let e = engine(scenario_config());
    let shape = BatchShape::new(2, 2).unwrap();
    let initial = LatticeBatch::filled(shape, Strategy::Cooperate).unwrap();
    let out = e.run_from(4, initial.clone()).unwrap();

    assert_eq!(out.cooperation.len(), 4);
    for row in &out.cooperation {
        assert_eq!(row, &vec![1.0, 1.0]);
    }
    assert_eq!(out.final_lattice, initial);
}

#[test]
fn all_defect_is_a_best_response_fixed_point() {
    let e = engine(scenario_config());
    let shape = BatchShape::new(2, 2).unwrap();
    let initial = LatticeBatch::filled(shape, Strategy::Defect).unwrap();
    let out = e.run_from(4, initial.clone()).unwrap();

    for row in &out.cooperation {
        assert_eq!(row, &vec![0.0, 0.0]);
    }
    assert_eq!(out.final_lattice, initial);
}

// ── reproducibility ───────────────────────────────────────────

#[test]
fn best_response_runs_are_bit_identical() {
    let config = EngineConfig {
        seed: 1234,
        ..EngineConfig::default()
    };
    let spec = RunSpec {
        n: 16,
        worlds: 3,
        iterations: 10,
        initial_cooperation: 0.5,
    };
    let a = engine(config).run(spec).unwrap();
    let b = engine(config).run(spec).unwrap();
    assert_eq!(a.cooperation, b.cooperation);
    assert_eq!(a.final_lattice, b.final_lattice);
}

#[test]
fn replicator_runs_replay_from_seed() {
    let config = EngineConfig {
        update_rule: UpdateRule::Replicator,
        neighborhood: Neighborhood::VonNeumann,
        mutation_threshold: 0.01,
        seed: 7,
        ..EngineConfig::default()
    };
    let spec = RunSpec {
        n: 16,
        worlds: 2,
        iterations: 8,
        initial_cooperation: 0.5,
    };
    let a = engine(config).run(spec).unwrap();
    let b = engine(config).run(spec).unwrap();
    assert_eq!(a.cooperation, b.cooperation);
    assert_eq!(a.final_lattice, b.final_lattice);

    let other_seed = EngineConfig { seed: 8, ..config };
    let c = engine(other_seed).run(spec).unwrap();
    assert_ne!(
        a.final_lattice, c.final_lattice,
        "distinct seeds should diverge on a 16x16 lattice"
    );
}

// ── replicator semantics ──────────────────────────────────────

#[test]
fn flat_payoff_and_zero_mutation_freeze_the_lattice() {
    // Equal payoffs give dp_max = 0, so imitation never fires; with the
    // mutation threshold at zero nothing can change.
    let config = EngineConfig {
        update_rule: UpdateRule::Replicator,
        payoff: PayoffMatrix::new(1.0, 1.0, 1.0, 1.0),
        mutation_threshold: 0.0,
        seed: 5,
        ..EngineConfig::default()
    };
    let e = engine(config);
    let shape = BatchShape::new(1, 8).unwrap();
    let mut initial = LatticeBatch::zeroed(shape).unwrap();
    for i in 0..8 {
        initial.set(0, i % 8, (i * 3) % 8, Strategy::Cooperate);
    }
    let out = e.run_from(6, initial.clone()).unwrap();
    assert_eq!(out.final_lattice, initial);
}

#[test]
fn certain_mutation_flips_every_cell_each_pass() {
    // Draws are in [0, 1), so a threshold of 1.0 mutates every cell; with a
    // flat payoff the update is a pure complement per pass.
    let config = EngineConfig {
        update_rule: UpdateRule::Replicator,
        payoff: PayoffMatrix::new(1.0, 1.0, 1.0, 1.0),
        mutation_threshold: 1.0,
        ..EngineConfig::default()
    };
    let e = engine(config);
    let shape = BatchShape::new(1, 4).unwrap();
    let initial = LatticeBatch::filled(shape, Strategy::Defect).unwrap();
    let out = e.run_from(3, initial.clone()).unwrap();

    assert_eq!(out.cooperation, vec![vec![0.0], vec![1.0], vec![0.0]]);
    assert_eq!(out.final_lattice, initial.complement());
}

#[test]
fn cooperation_fractions_stay_in_unit_interval() {
    let config = EngineConfig {
        update_rule: UpdateRule::Replicator,
        mutation_threshold: 0.05,
        seed: 31,
        ..EngineConfig::default()
    };
    let spec = RunSpec {
        n: 12,
        worlds: 4,
        iterations: 20,
        initial_cooperation: 0.3,
    };
    let out = engine(config).run(spec).unwrap();
    assert_eq!(out.cooperation.len(), 20);
    for row in &out.cooperation {
        assert_eq!(row.len(), 4);
        for &frac in row {
            assert!((0.0..=1.0).contains(&frac), "fraction out of range: {frac}");
        }
    }
    assert_eq!(out.metrics.passes, 20);
    assert!(out.metrics.memory_bytes > 0);
}

// ── complement symmetry ───────────────────────────────────────

#[test]
fn initial_counts_of_complements_sum_to_one() {
    let e = engine(EngineConfig::default());
    let shape = BatchShape::new(1, 6).unwrap();
    let mut initial = LatticeBatch::zeroed(shape).unwrap();
    for i in 0..6 {
        initial.set(0, i, (i * 2) % 6, Strategy::Cooperate);
    }
    let a = e.run_from(1, initial.clone()).unwrap();
    let b = e.run_from(1, initial.complement()).unwrap();
    let sum = a.cooperation[0][0] + b.cooperation[0][0];
    assert!((sum - 1.0).abs() < 1e-6);
}

// ── cancellation ──────────────────────────────────────────────

#[test]
fn abort_yields_aborted_and_no_output() {
    let e = engine(EngineConfig::default());
    let spec = RunSpec {
        n: 64,
        worlds: 4,
        iterations: 50_000_000,
        initial_cooperation: 0.5,
    };
    let handle = e.spawn_run(spec).unwrap();
    handle.abort();
    match handle.join() {
        Err(RunError::Aborted) => {}
        other => panic!("expected Aborted, got {:?}", other.map(|o| o.metrics)),
    }
}

// ── rejected configurations ───────────────────────────────────

#[test]
fn invalid_specs_fail_before_any_work() {
    let e = engine(EngineConfig::default());
    let good = RunSpec {
        n: 4,
        worlds: 1,
        iterations: 1,
        initial_cooperation: 0.5,
    };

    let err = e.run(RunSpec { n: 0, ..good }).unwrap_err();
    assert!(matches!(err, RunError::Config(ConfigError::ZeroLatticeSide)));

    let err = e.run(RunSpec { worlds: 0, ..good }).unwrap_err();
    assert!(matches!(err, RunError::Config(ConfigError::ZeroWorlds)));

    let err = e
        .run(RunSpec {
            initial_cooperation: f32::NAN,
            ..good
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RunError::Config(ConfigError::ProbabilityOutOfRange { .. })
    ));

    let err = e
        .run(RunSpec {
            n: usize::MAX,
            worlds: 2,
            ..good
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RunError::Config(ConfigError::LatticeTooLarge { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_valid_spec_runs_and_stays_in_bounds(
        n in 1usize..8,
        worlds in 1usize..4,
        iterations in 0usize..6,
        initial_cooperation in 0.0f32..=1.0,
        replicator in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let config = EngineConfig {
            update_rule: if replicator {
                UpdateRule::Replicator
            } else {
                UpdateRule::BestResponse
            },
            seed,
            ..EngineConfig::default()
        };
        let spec = RunSpec { n, worlds, iterations, initial_cooperation };
        let out = engine(config).run(spec).unwrap();

        prop_assert_eq!(out.cooperation.len(), iterations);
        for row in &out.cooperation {
            prop_assert_eq!(row.len(), worlds);
            for &frac in row {
                prop_assert!((0.0..=1.0).contains(&frac));
            }
        }
        prop_assert_eq!(out.final_lattice.shape().worlds(), worlds);
        prop_assert!(out.final_lattice.cells().iter().all(|&c| c <= 1));
    }
}

#[test]
fn invalid_engine_configs_are_rejected_at_construction() {
    let backend = Arc::new(CpuBackend::new());

    let nan_payoff = EngineConfig {
        payoff: PayoffMatrix::new(f32::NAN, 7.0, 0.0, 0.0),
        ..EngineConfig::default()
    };
    assert_eq!(
        Engine::new(nan_payoff, backend.clone()).err(),
        Some(ConfigError::NonFinitePayoff)
    );

    let bad_threshold = EngineConfig {
        mutation_threshold: 2.0,
        ..EngineConfig::default()
    };
    assert!(matches!(
        Engine::new(bad_threshold, backend).err(),
        Some(ConfigError::ProbabilityOutOfRange { .. })
    ));
}
