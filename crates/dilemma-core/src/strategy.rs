//! Per-cell strategies and the update-rule selector.

use std::fmt;

/// Raw cell value for a defecting cell.
pub const DEFECT: u8 = 0;

/// Raw cell value for a cooperating cell.
pub const COOPERATE: u8 = 1;

/// The two possible strategies a lattice cell can hold.
///
/// Lattices store strategies as raw `u8` cells (`0` = defect, `1` =
/// cooperate) so that counting and payoff accumulation vectorize; this enum
/// is the typed view used at API boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The cell cooperates in the one-shot game.
    Cooperate,
    /// The cell defects in the one-shot game.
    Defect,
}

impl Strategy {
    /// Raw cell encoding (`1` for cooperate, `0` for defect).
    pub fn as_cell(self) -> u8 {
        match self {
            Self::Cooperate => COOPERATE,
            Self::Defect => DEFECT,
        }
    }

    /// Decode a raw cell value. Any non-zero value reads as cooperate.
    pub fn from_cell(cell: u8) -> Self {
        if cell == DEFECT {
            Self::Defect
        } else {
            Self::Cooperate
        }
    }

    /// The opposite strategy.
    pub fn flipped(self) -> Self {
        match self {
            Self::Cooperate => Self::Defect,
            Self::Defect => Self::Cooperate,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cooperate => write!(f, "cooperate"),
            Self::Defect => write!(f, "defect"),
        }
    }
}

/// Which per-cell transition function the Update stage applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateRule {
    /// Deterministic imitate-the-best rule: adopt the strategy of the
    /// strictly highest accumulated reward among self and neighbors.
    BestResponse,
    /// Stochastic imitation with mutation: pick one neighbor uniformly at
    /// random and adopt its strategy with probability proportional to the
    /// normalized payoff advantage.
    Replicator,
}
