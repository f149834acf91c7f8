//! The reference CPU backend, data-parallel across worlds.

use dilemma_core::{BackendError, BatchShape, Neighborhood, PayoffMatrix};
use rayon::prelude::*;

use crate::backend::{check_len, Backend, ReplicatorParams};
use crate::best::best_world;
use crate::count::count_world;
use crate::play::play_world;
use crate::replicator::replicator_world;

/// Rayon-parallel backend: worlds of a batch are processed independently,
/// one rayon task per world.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// Create a new CPU backend.
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Backend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn count_cooperators(
        &self,
        lattice: &[u8],
        shape: BatchShape,
        counts: &mut [u32],
    ) -> Result<(), BackendError> {
        check_len("lattice", shape.total_cells(), lattice.len())?;
        check_len("counts", shape.worlds(), counts.len())?;
        let per = shape.cells_per_world();
        if per == 0 {
            counts.fill(0);
            return Ok(());
        }
        lattice
            .par_chunks_exact(per)
            .zip(counts.par_iter_mut())
            .for_each(|(cells, count)| *count = count_world(cells));
        Ok(())
    }

    fn compute_rewards(
        &self,
        lattice: &[u8],
        shape: BatchShape,
        hood: Neighborhood,
        payoff: &PayoffMatrix,
        rewards: &mut [f32],
    ) -> Result<(), BackendError> {
        check_len("lattice", shape.total_cells(), lattice.len())?;
        check_len("rewards", shape.total_cells(), rewards.len())?;
        let per = shape.cells_per_world();
        if per == 0 {
            return Ok(());
        }
        lattice
            .par_chunks_exact(per)
            .zip(rewards.par_chunks_exact_mut(per))
            .enumerate()
            .try_for_each(|(world, (cells, out))| {
                match play_world(cells, shape.n(), hood, payoff, out) {
                    None => Ok(()),
                    Some(cell) => Err(BackendError::NonFiniteReward { world, cell }),
                }
            })
    }

    fn update_best(
        &self,
        lattice: &[u8],
        rewards: &[f32],
        shape: BatchShape,
        hood: Neighborhood,
        next: &mut [u8],
    ) -> Result<(), BackendError> {
        check_len("lattice", shape.total_cells(), lattice.len())?;
        check_len("rewards", shape.total_cells(), rewards.len())?;
        check_len("next", shape.total_cells(), next.len())?;
        let per = shape.cells_per_world();
        if per == 0 {
            return Ok(());
        }
        lattice
            .par_chunks_exact(per)
            .zip(rewards.par_chunks_exact(per))
            .zip(next.par_chunks_exact_mut(per))
            .for_each(|((cells, rewards), out)| {
                best_world(cells, rewards, shape.n(), hood, out);
            });
        Ok(())
    }

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
    ) -> Result<(), BackendError> {
        check_len("lattice", shape.total_cells(), lattice.len())?;
        check_len("rewards", shape.total_cells(), rewards.len())?;
        check_len("mutation_draws", shape.total_cells(), mutation_draws.len())?;
        check_len("choice_draws", shape.total_cells(), choice_draws.len())?;
        check_len("next", shape.total_cells(), next.len())?;
        let per = shape.cells_per_world();
        if per == 0 {
            return Ok(());
        }
        lattice
            .par_chunks_exact(per)
            .zip(rewards.par_chunks_exact(per))
            .zip(mutation_draws.par_chunks_exact(per))
            .zip(choice_draws.par_chunks_exact(per))
            .zip(next.par_chunks_exact_mut(per))
            .for_each(|((((cells, rewards), mutation), choice), out)| {
                replicator_world(cells, rewards, shape.n(), hood, params, mutation, choice, out);
            });
        Ok(())
    }
}
