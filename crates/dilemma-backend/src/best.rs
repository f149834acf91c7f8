//! The deterministic best-response update kernel.

use dilemma_core::Neighborhood;

use crate::grid::neighbor_ranks;

/// Update one world under the best-response rule. `out` is fully rewritten.
///
/// The scan uses strict `>` in offset-table order, so the cell keeps its own
/// strategy on any tie, and the earliest maximal neighbor wins otherwise.
pub(crate) fn best_world(
    cells: &[u8],
    rewards: &[f32],
    n: usize,
    hood: Neighborhood,
    out: &mut [u8],
) {
    for row in 0..n {
        for col in 0..n {
            let me = row * n + col;
            let mut best_reward = rewards[me];
            let mut best = cells[me];
            for nb in neighbor_ranks(hood, row, col, n) {
                if rewards[nb] > best_reward {
                    best_reward = rewards[nb];
                    best = cells[nb];
                }
            }
            out[me] = best;
        }
    }
}
