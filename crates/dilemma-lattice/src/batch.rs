//! A batch of strategy lattices stored as one flat grid.

use dilemma_core::{BatchShape, Strategy};

use crate::error::LatticeError;

/// Allocate a zero-filled `Vec` through `try_reserve_exact`, so oversized
/// requests fail with [`LatticeError::AllocationFailed`] instead of aborting.
pub fn try_zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>, LatticeError> {
    let mut v: Vec<T> = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| LatticeError::AllocationFailed {
            requested_bytes: len * std::mem::size_of::<T>(),
        })?;
    v.resize(len, T::default());
    Ok(v)
}

/// `worlds` independent `n` x `n` strategy lattices in one flat buffer.
///
/// Cells are raw strategy values (`0` = defect, `1` = cooperate) laid out
/// row-major, world-major per [`BatchShape::rank`]. Worlds never interact;
/// the per-world slices returned by [`world`](Self::world) are disjoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeBatch {
    shape: BatchShape,
    cells: Vec<u8>,
}

impl LatticeBatch {
    /// Allocate an all-defect batch.
    pub fn zeroed(shape: BatchShape) -> Result<Self, LatticeError> {
        Ok(Self {
            shape,
            cells: try_zeroed(shape.total_cells())?,
        })
    }

    /// Allocate a batch with every cell set to `strategy`.
    pub fn filled(shape: BatchShape, strategy: Strategy) -> Result<Self, LatticeError> {
        let mut batch = Self::zeroed(shape)?;
        batch.cells.fill(strategy.as_cell());
        Ok(batch)
    }

    /// Wrap an existing cell buffer. Returns `None` on a length mismatch.
    pub fn from_cells(shape: BatchShape, cells: Vec<u8>) -> Option<Self> {
        (cells.len() == shape.total_cells()).then_some(Self { shape, cells })
    }

    /// The batch shape.
    pub fn shape(&self) -> BatchShape {
        self.shape
    }

    /// All cells, flat.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// All cells, flat and mutable.
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// The cells of one world.
    pub fn world(&self, w: usize) -> &[u8] {
        let per = self.shape.cells_per_world();
        &self.cells[w * per..(w + 1) * per]
    }

    /// Typed read of one cell.
    pub fn get(&self, world: usize, row: usize, col: usize) -> Strategy {
        Strategy::from_cell(self.cells[self.shape.rank(world, row, col)])
    }

    /// Typed write of one cell.
    pub fn set(&mut self, world: usize, row: usize, col: usize, strategy: Strategy) {
        let rank = self.shape.rank(world, row, col);
        self.cells[rank] = strategy.as_cell();
    }

    /// A copy of this batch with every cell flipped.
    pub fn complement(&self) -> Self {
        let cells = self.cells.iter().map(|&c| c ^ 1).collect();
        Self {
            shape: self.shape,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> BatchShape {
        BatchShape::new(2, 3).unwrap()
    }

    #[test]
    fn zeroed_is_all_defect() {
        let batch = LatticeBatch::zeroed(shape()).unwrap();
        assert!(batch.cells().iter().all(|&c| c == 0));
        assert_eq!(batch.cells().len(), 18);
    }

    #[test]
    fn filled_cooperate() {
        let batch = LatticeBatch::filled(shape(), Strategy::Cooperate).unwrap();
        assert!(batch.cells().iter().all(|&c| c == 1));
    }

    #[test]
    fn world_slices_are_disjoint() {
        let mut batch = LatticeBatch::zeroed(shape()).unwrap();
        batch.set(1, 0, 0, Strategy::Cooperate);
        assert!(batch.world(0).iter().all(|&c| c == 0));
        assert_eq!(batch.world(1)[0], 1);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert!(LatticeBatch::from_cells(shape(), vec![0; 5]).is_none());
        assert!(LatticeBatch::from_cells(shape(), vec![0; 18]).is_some());
    }

    #[test]
    fn complement_flips_every_cell() {
        let mut batch = LatticeBatch::zeroed(shape()).unwrap();
        batch.set(0, 1, 1, Strategy::Cooperate);
        let flipped = batch.complement();
        assert_eq!(flipped.get(0, 1, 1), Strategy::Defect);
        assert_eq!(flipped.get(0, 0, 0), Strategy::Cooperate);
    }
}
