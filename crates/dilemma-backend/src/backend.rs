//! The [`Backend`] trait: the four operations of the per-pass pipeline.

use dilemma_core::{BackendError, BatchShape, Neighborhood, PayoffMatrix};

/// Scalar parameters of the replicator update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplicatorParams {
    /// Normalization range for payoff differences (`PayoffMatrix::dp_max`).
    /// A value of 0 disables imitation entirely.
    pub dp_max: f32,
    /// Per-cell mutation probability threshold in `[0, 1]`.
    pub mutation_threshold: f32,
}

/// A numeric back end implementing the four per-pass compute stages.
///
/// # Contract
///
/// - Every operation takes the batch shape and neighborhood explicitly and
///   validates buffer lengths against them.
/// - Operations are pure with respect to their inputs: identical inputs
///   produce identical outputs (randomness enters only through the draw
///   slices passed to [`update_replicator`](Self::update_replicator)).
/// - Output buffers are fully written; no stage reads its own output.
/// - Worlds are independent; implementations are free to process them in
///   parallel.
///
/// Implementations are shared across the engine's run worker threads, so
/// the trait requires `Send + Sync`.
pub trait Backend: Send + Sync {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Tally cooperating cells per world: `counts[w]` receives the number
    /// of cooperating cells in world `w` of `lattice`.
    fn count_cooperators(
        &self,
        lattice: &[u8],
        shape: BatchShape,
        counts: &mut [u32],
    ) -> Result<(), BackendError>;

    /// Accumulate one-shot game payoffs: for every cell, sum
    /// `payoff(self, neighbor)` over all neighbors under `hood`.
    /// `rewards` is fully rewritten.
    fn compute_rewards(
        &self,
        lattice: &[u8],
        shape: BatchShape,
        hood: Neighborhood,
        payoff: &PayoffMatrix,
        rewards: &mut [f32],
    ) -> Result<(), BackendError>;

    /// Deterministic best-response update: each cell of `next` receives the
    /// strategy of the strictly highest reward among the cell and its
    /// neighbors.
    ///
    /// Tie-break, fixed for reproducibility: the cell keeps its own strategy
    /// on any tie with a neighbor, and among neighbors the earliest entry in
    /// the neighborhood's offset table with the maximal reward wins.
    fn update_best(
        &self,
        lattice: &[u8],
        rewards: &[f32],
        shape: BatchShape,
        hood: Neighborhood,
        next: &mut [u8],
    ) -> Result<(), BackendError>;

    /// Stochastic replicator update with mutation.
    ///
    /// Per cell, `choice_draws` selects one neighbor uniformly (index
    /// `floor(draw * degree)`, clamped); if that neighbor's reward strictly
    /// exceeds the cell's, its strategy is adopted with probability
    /// `(neighbor - self) / dp_max` clamped to `[0, 1]`, tested against the
    /// fractional remainder of the same draw. Independently, the resulting
    /// strategy is flipped when `mutation_draws[cell] <
    /// params.mutation_threshold`. With `dp_max == 0` imitation never fires.
    #[allow(clippy::too_many_arguments)]
    fn update_replicator(
        &self,
        lattice: &[u8],
        rewards: &[f32],
        shape: BatchShape,
        hood: Neighborhood,
        params: ReplicatorParams,
        mutation_draws: &[f32],
        choice_draws: &[f32],
        next: &mut [u8],
    ) -> Result<(), BackendError>;
}

/// Check a buffer length against the shape-implied length.
pub(crate) fn check_len(
    buffer: &'static str,
    expected: usize,
    got: usize,
) -> Result<(), BackendError> {
    if expected == got {
        Ok(())
    } else {
        Err(BackendError::ShapeMismatch {
            buffer,
            expected,
            got,
        })
    }
}
