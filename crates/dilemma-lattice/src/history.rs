//! Time series of per-world cooperator counts.

use crate::batch::try_zeroed;
use crate::error::LatticeError;

/// `iterations` x `worlds` table of cooperating-cell counts.
///
/// Row `t` holds the counts measured on the "before" lattice at the start
/// of pass `t`, i.e. prior to that pass's update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CooperationHistory {
    iterations: usize,
    worlds: usize,
    counts: Vec<u32>,
}

impl CooperationHistory {
    /// Allocate a zeroed history.
    pub fn zeroed(iterations: usize, worlds: usize) -> Result<Self, LatticeError> {
        let len = iterations
            .checked_mul(worlds)
            .ok_or(LatticeError::AllocationFailed {
                requested_bytes: usize::MAX,
            })?;
        Ok(Self {
            iterations,
            worlds,
            counts: try_zeroed(len)?,
        })
    }

    /// Number of recorded iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of worlds per row.
    pub fn worlds(&self) -> usize {
        self.worlds
    }

    /// The per-world counts for pass `t`, writable by the Count stage.
    pub fn row_mut(&mut self, t: usize) -> &mut [u32] {
        &mut self.counts[t * self.worlds..(t + 1) * self.worlds]
    }

    /// The per-world counts for pass `t`.
    pub fn row(&self, t: usize) -> &[u32] {
        &self.counts[t * self.worlds..(t + 1) * self.worlds]
    }

    /// Count for pass `t`, world `w`.
    pub fn count(&self, t: usize, w: usize) -> u32 {
        self.counts[t * self.worlds + w]
    }

    /// Convert counts to cooperation fractions by dividing by the per-world
    /// cell count. Returns an `iterations` x `worlds` table.
    pub fn fractions(&self, cells_per_world: usize) -> Vec<Vec<f32>> {
        let denom = cells_per_world as f32;
        (0..self.iterations)
            .map(|t| self.row(t).iter().map(|&c| c as f32 / denom).collect())
            .collect()
    }
}
