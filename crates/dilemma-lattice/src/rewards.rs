//! Per-cell accumulated payoff for the current pass.

use dilemma_core::BatchShape;

use crate::batch::try_zeroed;
use crate::error::LatticeError;

/// Per-cell accumulated floating-point payoff, same layout as the lattices.
///
/// Fully rewritten by the Play stage every pass; values never carry over
/// between passes.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardGrid {
    shape: BatchShape,
    values: Vec<f32>,
}

impl RewardGrid {
    /// Allocate a zeroed reward grid.
    pub fn zeroed(shape: BatchShape) -> Result<Self, LatticeError> {
        Ok(Self {
            shape,
            values: try_zeroed(shape.total_cells())?,
        })
    }

    /// The batch shape.
    pub fn shape(&self) -> BatchShape {
        self.shape
    }

    /// All rewards, flat.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// All rewards, flat and mutable.
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Reward of one cell.
    pub fn get(&self, world: usize, row: usize, col: usize) -> f32 {
        self.values[self.shape.rank(world, row, col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_matches_shape() {
        let shape = BatchShape::new(2, 3).unwrap();
        let grid = RewardGrid::zeroed(shape).unwrap();
        assert_eq!(grid.values().len(), 18);
        assert!(grid.values().iter().all(|&v| v == 0.0));
    }
}
