//! The Play stage kernel: pairwise game payoff accumulation.

use dilemma_core::{Neighborhood, PayoffMatrix};

use crate::grid::neighbor_ranks;

/// Accumulate one world's rewards. `out` is fully rewritten.
///
/// Returns the flat index of the first cell whose accumulated reward is
/// non-finite, if any.
pub(crate) fn play_world(
    cells: &[u8],
    n: usize,
    hood: Neighborhood,
    payoff: &PayoffMatrix,
    out: &mut [f32],
) -> Option<usize> {
    let mut fault = None;
    for row in 0..n {
        for col in 0..n {
            let me = row * n + col;
            let mine = cells[me];
            let mut total = 0.0f32;
            for nb in neighbor_ranks(hood, row, col, n) {
                total += payoff.payoff_cells(mine, cells[nb]);
            }
            if !total.is_finite() && fault.is_none() {
                fault = Some(me);
            }
            out[me] = total;
        }
    }
    fault
}
