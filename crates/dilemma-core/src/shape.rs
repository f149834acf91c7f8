//! Batch shape: how many worlds, and the lattice side of each.

use std::fmt;

/// Shape of a batch of worlds: `worlds` independent `n` x `n` lattices.
///
/// All per-cell arrays in a run are flat, row-major, world-major:
/// `rank(w, r, c) = (w * n + r) * n + c`. Construction checks that the
/// total cell count fits in `usize`, so downstream code can multiply
/// without overflow checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchShape {
    worlds: usize,
    n: usize,
}

impl BatchShape {
    /// Build a shape, returning `None` if `worlds * n * n` overflows.
    ///
    /// Zero dimensions are representable here; rejecting them is the
    /// engine configuration layer's job.
    pub fn new(worlds: usize, n: usize) -> Option<Self> {
        n.checked_mul(n)?.checked_mul(worlds)?;
        Some(Self { worlds, n })
    }

    /// Number of worlds in the batch.
    pub fn worlds(&self) -> usize {
        self.worlds
    }

    /// Lattice side length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Cells per world (`n * n`).
    pub fn cells_per_world(&self) -> usize {
        self.n * self.n
    }

    /// Total cells across the batch (`worlds * n * n`).
    pub fn total_cells(&self) -> usize {
        self.worlds * self.cells_per_world()
    }

    /// Flat rank of `(world, row, col)`.
    pub fn rank(&self, world: usize, row: usize, col: usize) -> usize {
        (world * self.n + row) * self.n + col
    }
}

impl fmt::Display for BatchShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.worlds, self.n, self.n)
    }
}
