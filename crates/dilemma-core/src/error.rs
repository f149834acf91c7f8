//! Errors reported by compute backends.

use std::error::Error;
use std::fmt;

/// The four stages of the per-pass pipeline, for failure attribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageKind {
    /// Per-world cooperator counting.
    Count,
    /// Pairwise game payoff accumulation.
    Play,
    /// Deterministic best-response update.
    UpdateBest,
    /// Stochastic replicator update.
    UpdateReplicator,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Play => write!(f, "play"),
            Self::UpdateBest => write!(f, "update-best"),
            Self::UpdateReplicator => write!(f, "update-replicator"),
        }
    }
}

/// Errors from an individual compute-stage invocation.
///
/// Returned by the `Backend` operations and wrapped by the engine with the
/// failing stage and pass index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendError {
    /// A buffer's length disagrees with the declared batch shape.
    ShapeMismatch {
        /// Which buffer disagreed.
        buffer: &'static str,
        /// Length implied by the shape.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },
    /// Reward accumulation produced a non-finite value.
    NonFiniteReward {
        /// World containing the faulty cell.
        world: usize,
        /// Flat in-world cell index.
        cell: usize,
    },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                buffer,
                expected,
                got,
            } => {
                write!(
                    f,
                    "buffer '{buffer}' length {got} does not match shape (expected {expected})"
                )
            }
            Self::NonFiniteReward { world, cell } => {
                write!(f, "non-finite reward in world {world} at cell {cell}")
            }
        }
    }
}

impl Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_buffer() {
        let e = BackendError::ShapeMismatch {
            buffer: "rewards",
            expected: 16,
            got: 4,
        };
        assert!(e.to_string().contains("rewards"));
        assert!(e.to_string().contains("16"));
    }

    #[test]
    fn stage_kind_display() {
        assert_eq!(StageKind::Play.to_string(), "play");
        assert_eq!(StageKind::UpdateReplicator.to_string(), "update-replicator");
    }
}
