//! The one-shot game payoff matrix.

use crate::strategy::{Strategy, COOPERATE};

/// Payoff scalars of the one-shot pairwise game.
///
/// The classic naming: `t` (temptation, defect against a cooperator),
/// `r` (reward, mutual cooperation), `s` (sucker, cooperate against a
/// defector), `p` (punishment, mutual defection).
///
/// `dp_max()` is the derived normalization range used to convert reward
/// differences into imitation probabilities. It is always >= 0 and is 0
/// only when all four payoffs are equal; callers must treat that degenerate
/// case as "imitation probability 0" rather than dividing by it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffMatrix {
    /// Temptation: self defects, neighbor cooperates.
    pub t: f32,
    /// Reward: both cooperate.
    pub r: f32,
    /// Sucker: self cooperates, neighbor defects.
    pub s: f32,
    /// Punishment: both defect.
    pub p: f32,
}

impl PayoffMatrix {
    /// Construct a payoff matrix from the four scalars.
    pub fn new(t: f32, r: f32, s: f32, p: f32) -> Self {
        Self { t, r, s, p }
    }

    /// Maximum payoff difference: `max(t,r,s,p) - min(t,r,s,p)`.
    pub fn dp_max(&self) -> f32 {
        let max = self.t.max(self.r).max(self.s).max(self.p);
        let min = self.t.min(self.r).min(self.s).min(self.p);
        max - min
    }

    /// Whether all four payoffs are finite.
    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.r.is_finite() && self.s.is_finite() && self.p.is_finite()
    }

    /// One-shot game payoff to `me` when playing against `other`.
    pub fn payoff(&self, me: Strategy, other: Strategy) -> f32 {
        self.payoff_cells(me.as_cell(), other.as_cell())
    }

    /// Raw-cell variant of [`payoff`](Self::payoff) for the hot path.
    pub fn payoff_cells(&self, me: u8, other: u8) -> f32 {
        match (me == COOPERATE, other == COOPERATE) {
            (true, true) => self.r,
            (true, false) => self.s,
            (false, true) => self.t,
            (false, false) => self.p,
        }
    }
}

impl Default for PayoffMatrix {
    /// A strong-temptation configuration: T=10, R=7, S=0, P=0.
    fn default() -> Self {
        Self::new(10.0, 7.0, 0.0, 0.0)
    }
}
