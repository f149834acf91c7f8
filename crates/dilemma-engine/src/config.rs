//! Engine and run configuration with up-front validation.

use std::fmt;

use dilemma_core::{BatchShape, Neighborhood, PayoffMatrix, UpdateRule};

/// Default per-cell mutation probability for the replicator rule.
pub const DEFAULT_MUTATION_THRESHOLD: f32 = 1e-3;

/// Parameters fixed for the lifetime of an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Which cells play against each other.
    pub neighborhood: Neighborhood,
    /// The one-shot game payoffs.
    pub payoff: PayoffMatrix,
    /// How cells revise their strategy each pass.
    pub update_rule: UpdateRule,
    /// Per-cell mutation probability, replicator rule only.
    pub mutation_threshold: f32,
    /// Root seed for every random draw of every run.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::Moore,
            payoff: PayoffMatrix::default(),
            update_rule: UpdateRule::BestResponse,
            mutation_threshold: DEFAULT_MUTATION_THRESHOLD,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Reject non-finite payoffs and out-of-range mutation thresholds.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.payoff.is_finite() {
            return Err(ConfigError::NonFinitePayoff);
        }
        check_probability("mutation_threshold", self.mutation_threshold)?;
        Ok(())
    }
}

/// Shape and length of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSpec {
    /// Lattice side length; every world is `n` x `n`.
    pub n: usize,
    /// Number of independent worlds processed in lockstep.
    pub worlds: usize,
    /// Number of passes to execute.
    pub iterations: usize,
    /// Probability that a cell starts out cooperating.
    pub initial_cooperation: f32,
}

impl RunSpec {
    /// Validate the spec and produce the batch shape.
    pub(crate) fn shape(&self) -> Result<BatchShape, ConfigError> {
        if self.n == 0 {
            return Err(ConfigError::ZeroLatticeSide);
        }
        if self.worlds == 0 {
            return Err(ConfigError::ZeroWorlds);
        }
        check_probability("initial_cooperation", self.initial_cooperation)?;
        BatchShape::new(self.worlds, self.n).ok_or(ConfigError::LatticeTooLarge {
            worlds: self.worlds,
            n: self.n,
        })
    }
}

fn check_probability(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { what, value })
    }
}

/// A configuration rejected before any buffer was allocated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The lattice side length was zero.
    ZeroLatticeSide,
    /// The world count was zero.
    ZeroWorlds,
    /// `worlds * n * n` does not fit in `usize`.
    LatticeTooLarge {
        /// Requested world count.
        worlds: usize,
        /// Requested side length.
        n: usize,
    },
    /// A probability parameter was non-finite or outside `[0, 1]`.
    ProbabilityOutOfRange {
        /// Which parameter.
        what: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A payoff matrix entry was NaN or infinite.
    NonFinitePayoff,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLatticeSide => write!(f, "lattice side length must be at least 1"),
            Self::ZeroWorlds => write!(f, "world count must be at least 1"),
            Self::LatticeTooLarge { worlds, n } => {
                write!(f, "cell count overflows usize: {worlds} worlds of {n}x{n}")
            }
            Self::ProbabilityOutOfRange { what, value } => {
                write!(f, "{what} must be a finite probability in [0, 1], got {value}")
            }
            Self::NonFinitePayoff => write!(f, "payoff matrix entries must be finite"),
        }
    }
}

impl std::error::Error for ConfigError {}
