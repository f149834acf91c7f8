//! Per-world cooperator counting.

use dilemma_core::COOPERATE;

/// Count the cooperating cells of one world.
pub(crate) fn count_world(cells: &[u8]) -> u32 {
    cells.iter().filter(|&&c| c == COOPERATE).count() as u32
}
