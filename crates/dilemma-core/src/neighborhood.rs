//! Lattice neighborhoods with toroidal (wrap-around) indexing.

use std::fmt;

/// The 4 orthogonal offsets: N, S, W, E.
pub const OFFSETS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// All 8 offsets: N, S, W, E, NW, NE, SW, SE.
pub const OFFSETS_8: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Wrap a signed axis value onto `[0, n)` (torus topology).
pub fn wrap(val: i32, n: usize) -> usize {
    let n = n as i32;
    (((val % n) + n) % n) as usize
}

/// Which cells count as neighbors of a lattice cell.
///
/// Fixed for the lifetime of an engine. Both shapes wrap on both axes, so
/// every cell has exactly `degree()` neighbors regardless of position.
/// The offset tables are ordered; the BestResponse tie-break and the
/// Replicator neighbor choice both index into them, so the ordering is part
/// of the reproducibility contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighborhood {
    /// 4-neighbor orthogonal adjacency.
    VonNeumann,
    /// 8-neighbor adjacency including diagonals.
    Moore,
}

impl Neighborhood {
    /// The fixed, ordered offset table for this neighborhood.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::VonNeumann => &OFFSETS_4,
            Self::Moore => &OFFSETS_8,
        }
    }

    /// Number of neighbors of every cell (4 or 8).
    pub fn degree(self) -> usize {
        self.offsets().len()
    }

    /// Rank (flat in-world index) of the `k`-th neighbor of `(row, col)`
    /// on an `n` x `n` torus.
    pub fn neighbor_rank(self, row: usize, col: usize, k: usize, n: usize) -> usize {
        let (dr, dc) = self.offsets()[k];
        let nr = wrap(row as i32 + dr, n);
        let nc = wrap(col as i32 + dc, n);
        nr * n + nc
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VonNeumann => write!(f, "von-neumann"),
            Self::Moore => write!(f, "moore"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn degrees() {
        assert_eq!(Neighborhood::VonNeumann.degree(), 4);
        assert_eq!(Neighborhood::Moore.degree(), 8);
    }

    #[test]
    fn wrap_negative_and_overflow() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(3, 5), 3);
        assert_eq!(wrap(-6, 5), 4);
    }

    #[test]
    fn moore_corner_wraps_to_opposite_corner() {
        // On a 3x3 torus, the NW neighbor of (0,0) is (2,2).
        let n = 3;
        let ranks: Vec<usize> = (0..Neighborhood::Moore.degree())
            .map(|k| Neighborhood::Moore.neighbor_rank(0, 0, k, n))
            .collect();
        assert!(ranks.contains(&(2 * n + 2)), "missing (2,2) in {ranks:?}");
    }

    #[test]
    fn von_neumann_interior() {
        let n = 5;
        let ranks: Vec<usize> = (0..4)
            .map(|k| Neighborhood::VonNeumann.neighbor_rank(2, 2, k, n))
            .collect();
        assert_eq!(ranks, vec![1 * n + 2, 3 * n + 2, 2 * n + 1, 2 * n + 3]);
    }

    proptest! {
        #[test]
        fn wrap_stays_in_range(val in -100i32..100, n in 1usize..20) {
            prop_assert!(wrap(val, n) < n);
        }

        #[test]
        fn neighbor_relation_is_symmetric(
            r in 0usize..6, c in 0usize..6, n in 2usize..7, moore in any::<bool>(),
        ) {
            let r = r % n;
            let c = c % n;
            let hood = if moore { Neighborhood::Moore } else { Neighborhood::VonNeumann };
            for k in 0..hood.degree() {
                let nb = hood.neighbor_rank(r, c, k, n);
                let (nr, nc) = (nb / n, nb % n);
                let back: Vec<usize> =
                    (0..hood.degree()).map(|j| hood.neighbor_rank(nr, nc, j, n)).collect();
                prop_assert!(back.contains(&(r * n + c)));
            }
        }
    }
}
