//! Seedable uniform draw streams for stochastic stages.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What a batch of uniform draws will be used for.
///
/// Each purpose carries its own salt, so the streams for initialization,
/// mutation, and neighbor choice never overlap even within one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawPurpose {
    /// Bernoulli initialization of the starting lattice.
    Init,
    /// Per-cell mutation decisions of the replicator rule.
    Mutation,
    /// Per-cell neighbor selection of the replicator rule.
    NeighborChoice,
}

impl DrawPurpose {
    fn salt(self) -> u64 {
        match self {
            Self::Init => 0x8f9a_2c56_01d4_77e3,
            Self::Mutation => 0x1b3e_64a9_d20f_5c18,
            Self::NeighborChoice => 0xc7d1_0b82_39e6_f4a5,
        }
    }
}

/// A source of uniform `f32` draws in `[0, 1)`, keyed by pass and purpose.
///
/// The same `(pass, purpose)` pair always yields the same values for a
/// given source, so a run replays bit-identically from its seed.
pub trait DrawSource: Send {
    /// Fill `out` with uniform draws for the given pass and purpose.
    fn fill_uniform(&mut self, pass: u64, purpose: DrawPurpose, out: &mut [f32]);
}

/// The default draw source: one ChaCha8 stream per `(seed, pass, purpose)`.
#[derive(Clone, Copy, Debug)]
pub struct ChaChaDraws {
    seed: u64,
}

impl ChaChaDraws {
    /// Create a source rooted at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DrawSource for ChaChaDraws {
    fn fill_uniform(&mut self, pass: u64, purpose: DrawPurpose, out: &mut [f32]) {
        let stream = self
            .seed
            .wrapping_add(pass.wrapping_mul(0x9e37_79b9_7f4a_7c15))
            ^ purpose.salt();
        let mut rng = ChaCha8Rng::seed_from_u64(stream);
        for v in out.iter_mut() {
            *v = rng.random();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(seed: u64, pass: u64, purpose: DrawPurpose) -> Vec<f32> {
        let mut out = vec![0.0f32; 64];
        ChaChaDraws::new(seed).fill_uniform(pass, purpose, &mut out);
        out
    }

    #[test]
    fn values_are_unit_interval() {
        let out = draws(7, 3, DrawPurpose::Mutation);
        assert!(out.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn same_key_replays_identically() {
        assert_eq!(
            draws(42, 5, DrawPurpose::NeighborChoice),
            draws(42, 5, DrawPurpose::NeighborChoice)
        );
    }

    #[test]
    fn purposes_and_passes_yield_distinct_streams() {
        let base = draws(42, 5, DrawPurpose::Mutation);
        assert_ne!(base, draws(42, 5, DrawPurpose::NeighborChoice));
        assert_ne!(base, draws(42, 6, DrawPurpose::Mutation));
        assert_ne!(base, draws(43, 5, DrawPurpose::Mutation));
    }
}
