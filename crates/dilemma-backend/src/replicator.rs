//! The stochastic replicator update kernel.

use dilemma_core::Neighborhood;

use crate::backend::ReplicatorParams;

/// Update one world under the replicator rule. `out` is fully rewritten.
///
/// Two uniform draws feed each cell: `choice[me]` picks the neighbor (its
/// integer part after scaling by the degree) and supplies the adoption
/// uniform (its fractional remainder, which is uniform and independent of
/// the selected index); `mutation[me]` drives the post-imitation flip.
#[allow(clippy::too_many_arguments)]
pub(crate) fn replicator_world(
    cells: &[u8],
    rewards: &[f32],
    n: usize,
    hood: Neighborhood,
    params: ReplicatorParams,
    mutation: &[f32],
    choice: &[f32],
    out: &mut [u8],
) {
    let k = hood.degree();
    for row in 0..n {
        for col in 0..n {
            let me = row * n + col;
            let mut next = cells[me];

            let scaled = choice[me] * k as f32;
            let j = (scaled as usize).min(k - 1);
            let adopt_draw = scaled - j as f32;
            let nb = hood.neighbor_rank(row, col, j, n);

            if params.dp_max > 0.0 && rewards[nb] > rewards[me] {
                let p = ((rewards[nb] - rewards[me]) / params.dp_max).clamp(0.0, 1.0);
                if adopt_draw < p {
                    next = cells[nb];
                }
            }

            if mutation[me] < params.mutation_threshold {
                next ^= 1;
            }
            out[me] = next;
        }
    }
}
