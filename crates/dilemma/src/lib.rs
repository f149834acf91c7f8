//! Dilemma: a batched spatial iterated Prisoner's Dilemma simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all dilemma sub-crates. For most users, adding `dilemma` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use dilemma::prelude::*;
//!
//! // Four 32x32 toroidal worlds, deterministic best-response updates.
//! let config = EngineConfig {
//!     neighborhood: Neighborhood::Moore,
//!     payoff: PayoffMatrix::new(10.0, 7.0, 0.0, 0.0),
//!     update_rule: UpdateRule::BestResponse,
//!     seed: 42,
//!     ..EngineConfig::default()
//! };
//! let engine = Engine::new(config, Arc::new(CpuBackend::new())).unwrap();
//!
//! let spec = RunSpec {
//!     n: 32,
//!     worlds: 4,
//!     iterations: 25,
//!     initial_cooperation: 0.5,
//! };
//! let out = engine.run(spec).unwrap();
//!
//! assert_eq!(out.cooperation.len(), 25);
//! for row in &out.cooperation {
//!     assert!(row.iter().all(|&frac| (0.0..=1.0).contains(&frac)));
//! }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dilemma-core` | Strategies, payoffs, neighborhoods, shapes |
//! | [`lattice`] | `dilemma-lattice` | Strategy grids, double buffering, history |
//! | [`backend`] | `dilemma-backend` | Compute stage contract and CPU backend |
//! | [`engine`] | `dilemma-engine` | Configuration, run worker, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`dilemma-core`).
///
/// Strategies, the payoff matrix, neighborhoods with toroidal wrapping,
/// batch shapes, and the backend error type.
pub use dilemma_core as types;

/// Buffer ownership (`dilemma-lattice`).
///
/// [`lattice::LatticeBatch`] strategy grids, the ping-pong
/// [`lattice::DoubleBuffer`], per-pass [`lattice::RewardGrid`], and the
/// [`lattice::CooperationHistory`] time series.
pub use dilemma_lattice as lattice;

/// Compute stage contract and implementations (`dilemma-backend`).
///
/// The [`backend::Backend`] trait and the rayon-parallel
/// [`backend::CpuBackend`] reference implementation.
pub use dilemma_backend as backend;

/// Run orchestration (`dilemma-engine`).
///
/// [`engine::Engine`] pairs a validated [`engine::EngineConfig`] with a
/// backend; runs execute on a worker thread behind an
/// [`engine::RunHandle`].
pub use dilemma_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use dilemma::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use dilemma_core::{
        BatchShape, Neighborhood, PayoffMatrix, Strategy, UpdateRule,
    };

    // Errors
    pub use dilemma_core::BackendError;
    pub use dilemma_engine::{ConfigError, RunError};
    pub use dilemma_lattice::LatticeError;

    // Buffers
    pub use dilemma_lattice::{CooperationHistory, DoubleBuffer, LatticeBatch};

    // Backend
    pub use dilemma_backend::{Backend, CpuBackend};

    // Engine
    pub use dilemma_engine::{
        Engine, EngineConfig, RunHandle, RunMetrics, RunOutput, RunSpec,
    };
}
