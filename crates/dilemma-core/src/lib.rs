//! Core types for the dilemma simulation workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental vocabulary shared by every other crate: per-cell strategies,
//! the one-shot game payoff matrix, batch shapes, lattice neighborhoods
//! with toroidal indexing, and the compute-backend error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod neighborhood;
mod payoff;
mod shape;
mod strategy;

pub use error::{BackendError, StageKind};
pub use neighborhood::{wrap, Neighborhood, OFFSETS_4, OFFSETS_8};
pub use payoff::PayoffMatrix;
pub use shape::BatchShape;
pub use strategy::{Strategy, UpdateRule, COOPERATE, DEFECT};
