//! The run worker: pass loop, cancellation, and result delivery.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver};

use dilemma_backend::{Backend, ReplicatorParams};
use dilemma_core::{BackendError, BatchShape, StageKind, UpdateRule, COOPERATE, DEFECT};
use dilemma_lattice::{
    try_zeroed, CooperationHistory, DoubleBuffer, LatticeBatch, LatticeError, RewardGrid,
};

use crate::config::{ConfigError, EngineConfig, RunSpec};
use crate::draws::{ChaChaDraws, DrawPurpose, DrawSource};
use crate::metrics::RunMetrics;

/// Everything a completed run yields.
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// `cooperation[t][w]`: fraction of cooperating cells in world `w`
    /// measured before the update of pass `t`. Values lie in `[0, 1]`.
    pub cooperation: Vec<Vec<f32>>,
    /// The authoritative lattice after the final swap.
    pub final_lattice: LatticeBatch,
    /// Timing and memory data for the run.
    pub metrics: RunMetrics,
}

/// Why a run produced no output.
#[derive(Debug)]
pub enum RunError {
    /// The configuration or run spec was rejected before any allocation.
    Config(ConfigError),
    /// A buffer allocation failed; nothing was executed.
    ResourceExhausted(LatticeError),
    /// A compute stage failed; remaining passes were abandoned.
    Backend {
        /// The failing stage.
        stage: StageKind,
        /// Zero-based pass index at which the stage failed.
        pass: usize,
        /// The backend's failure report.
        source: BackendError,
    },
    /// The run was cancelled; no partial history escapes.
    Aborted,
    /// The run worker thread could not be spawned.
    ThreadSpawnFailed(std::io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::ResourceExhausted(e) => write!(f, "resource exhausted: {e}"),
            Self::Backend { stage, pass, source } => {
                write!(f, "backend failure in {stage} stage at pass {pass}: {source}")
            }
            Self::Aborted => write!(f, "run aborted"),
            Self::ThreadSpawnFailed(e) => write!(f, "failed to spawn run worker: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::ResourceExhausted(e) => Some(e),
            Self::Backend { source, .. } => Some(source),
            Self::Aborted => None,
            Self::ThreadSpawnFailed(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<LatticeError> for RunError {
    fn from(e: LatticeError) -> Self {
        Self::ResourceExhausted(e)
    }
}

/// Handle to a run executing on its worker thread.
///
/// Dropping the handle does not cancel the run; call
/// [`abort`](Self::abort) for that. [`join`](Self::join) is the single
/// blocking point.
pub struct RunHandle {
    abort: Arc<AtomicBool>,
    result: Receiver<Result<RunOutput, RunError>>,
    worker: JoinHandle<()>,
}

impl RunHandle {
    /// Request cancellation. The worker observes the flag at the next pass
    /// boundary and abandons the run whole.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    /// Whether the worker has finished (successfully or not).
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Block until the run completes, was aborted, or failed.
    ///
    /// A worker that vanished without delivering a result (a panic in a
    /// backend) is reported as [`RunError::Aborted`].
    pub fn join(self) -> Result<RunOutput, RunError> {
        let outcome = self.result.recv().unwrap_or(Err(RunError::Aborted));
        let _ = self.worker.join();
        outcome
    }
}

/// A validated configuration bound to a compute backend.
///
/// Cheap to clone; the backend is shared behind an `Arc`.
#[derive(Clone)]
pub struct Engine {
    config: EngineConfig,
    backend: Arc<dyn Backend>,
}

impl Engine {
    /// Validate `config` and bind it to `backend`.
    pub fn new(config: EngineConfig, backend: Arc<dyn Backend>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// The validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute a run to completion, initializing each cell i.i.d.
    /// Bernoulli(`spec.initial_cooperation`) from the engine seed.
    pub fn run(&self, spec: RunSpec) -> Result<RunOutput, RunError> {
        self.spawn_run(spec)?.join()
    }

    /// Execute a run to completion from a caller-supplied starting lattice.
    pub fn run_from(
        &self,
        iterations: usize,
        initial: LatticeBatch,
    ) -> Result<RunOutput, RunError> {
        self.spawn_run_from(iterations, initial)?.join()
    }

    /// Start a run on a worker thread. The spec is validated here, before
    /// the worker allocates anything.
    pub fn spawn_run(&self, spec: RunSpec) -> Result<RunHandle, RunError> {
        let shape = spec.shape()?;
        let engine = self.clone();
        self.spawn(move |abort| {
            let initial = engine.initial_lattice(shape, spec.initial_cooperation)?;
            engine.execute(spec.iterations, initial, &abort)
        })
    }

    /// Start a run on a worker thread from a caller-supplied lattice.
    pub fn spawn_run_from(
        &self,
        iterations: usize,
        initial: LatticeBatch,
    ) -> Result<RunHandle, RunError> {
        let engine = self.clone();
        self.spawn(move |abort| engine.execute(iterations, initial, &abort))
    }

    fn spawn<F>(&self, job: F) -> Result<RunHandle, RunError>
    where
        F: FnOnce(Arc<AtomicBool>) -> Result<RunOutput, RunError> + Send + 'static,
    {
        let abort = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&abort);
        let (tx, rx) = bounded(1);
        let worker = std::thread::Builder::new()
            .name("dilemma-run".into())
            .spawn(move || {
                // Best-effort delivery; the caller may have dropped the handle.
                let _ = tx.send(job(flag));
            })
            .map_err(RunError::ThreadSpawnFailed)?;
        Ok(RunHandle {
            abort,
            result: rx,
            worker,
        })
    }

    fn initial_lattice(
        &self,
        shape: BatchShape,
        initial_cooperation: f32,
    ) -> Result<LatticeBatch, RunError> {
        let mut draws = try_zeroed::<f32>(shape.total_cells())?;
        ChaChaDraws::new(self.config.seed).fill_uniform(0, DrawPurpose::Init, &mut draws);
        let mut lattice = LatticeBatch::zeroed(shape)?;
        for (cell, &u) in lattice.cells_mut().iter_mut().zip(&draws) {
            *cell = if u < initial_cooperation {
                COOPERATE
            } else {
                DEFECT
            };
        }
        Ok(lattice)
    }

    /// The pass loop. Count and Play fork-join over `before`; Update writes
    /// `after`; the swap makes it authoritative for the next pass.
    fn execute(
        &self,
        iterations: usize,
        initial: LatticeBatch,
        abort: &AtomicBool,
    ) -> Result<RunOutput, RunError> {
        let shape = initial.shape();
        let total = shape.total_cells();
        let run_start = Instant::now();

        let mut buffers = DoubleBuffer::from_initial(initial)?;
        let mut rewards = RewardGrid::zeroed(shape)?;
        let mut history = CooperationHistory::zeroed(iterations, shape.worlds())?;
        let (mut mutation_draws, mut choice_draws) = match self.config.update_rule {
            UpdateRule::Replicator => (try_zeroed::<f32>(total)?, try_zeroed::<f32>(total)?),
            UpdateRule::BestResponse => (Vec::new(), Vec::new()),
        };
        let mut draws = ChaChaDraws::new(self.config.seed);

        let mut metrics = RunMetrics {
            memory_bytes: 2 * total
                + (total + mutation_draws.len() + choice_draws.len()) * std::mem::size_of::<f32>()
                + iterations * shape.worlds() * std::mem::size_of::<u32>(),
            ..RunMetrics::default()
        };

        let hood = self.config.neighborhood;
        let payoff = self.config.payoff;
        let params = ReplicatorParams {
            dp_max: payoff.dp_max(),
            mutation_threshold: self.config.mutation_threshold,
        };
        let backend = self.backend.as_ref();

        for pass in 0..iterations {
            if abort.load(Ordering::Acquire) {
                return Err(RunError::Aborted);
            }
            let (before, after) = buffers.split();
            let row = history.row_mut(pass);

            let ((count_res, count_us), (play_res, play_us)) = rayon::join(
                || timed(|| backend.count_cooperators(before.cells(), shape, row)),
                || {
                    timed(|| {
                        backend.compute_rewards(
                            before.cells(),
                            shape,
                            hood,
                            &payoff,
                            rewards.values_mut(),
                        )
                    })
                },
            );
            metrics.count_us += count_us;
            metrics.play_us += play_us;
            count_res.map_err(|source| RunError::Backend {
                stage: StageKind::Count,
                pass,
                source,
            })?;
            play_res.map_err(|source| RunError::Backend {
                stage: StageKind::Play,
                pass,
                source,
            })?;

            let update_start = Instant::now();
            match self.config.update_rule {
                UpdateRule::BestResponse => backend
                    .update_best(
                        before.cells(),
                        rewards.values(),
                        shape,
                        hood,
                        after.cells_mut(),
                    )
                    .map_err(|source| RunError::Backend {
                        stage: StageKind::UpdateBest,
                        pass,
                        source,
                    })?,
                UpdateRule::Replicator => {
                    draws.fill_uniform(pass as u64, DrawPurpose::Mutation, &mut mutation_draws);
                    draws.fill_uniform(pass as u64, DrawPurpose::NeighborChoice, &mut choice_draws);
                    backend
                        .update_replicator(
                            before.cells(),
                            rewards.values(),
                            shape,
                            hood,
                            params,
                            &mutation_draws,
                            &choice_draws,
                            after.cells_mut(),
                        )
                        .map_err(|source| RunError::Backend {
                            stage: StageKind::UpdateReplicator,
                            pass,
                            source,
                        })?
                }
            }
            metrics.update_us += update_start.elapsed().as_micros() as u64;

            buffers.swap();
            metrics.passes += 1;
        }

        if abort.load(Ordering::Acquire) {
            return Err(RunError::Aborted);
        }
        metrics.total_us = run_start.elapsed().as_micros() as u64;
        Ok(RunOutput {
            cooperation: history.fractions(shape.cells_per_world()),
            final_lattice: buffers.into_before(),
            metrics,
        })
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, u64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_micros() as u64)
}
