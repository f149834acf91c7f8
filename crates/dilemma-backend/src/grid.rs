//! Neighbor-rank helpers shared by the per-stage kernels.

use dilemma_core::Neighborhood;
use smallvec::SmallVec;

/// Flat in-world ranks of all neighbors of `(row, col)` on an `n` x `n`
/// torus, in the neighborhood's fixed offset order.
pub(crate) fn neighbor_ranks(
    hood: Neighborhood,
    row: usize,
    col: usize,
    n: usize,
) -> SmallVec<[usize; 8]> {
    (0..hood.degree())
        .map(|k| hood.neighbor_rank(row, col, k, n))
        .collect()
}
