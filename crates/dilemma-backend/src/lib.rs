//! The compute stage contract and its reference CPU implementation.
//!
//! The engine depends on the [`Backend`] trait but never on a particular
//! implementation: it supplies buffers, random draws, and stage ordering,
//! while the backend owns the per-cell/per-world arithmetic. [`CpuBackend`]
//! is the vectorized reference implementation, data-parallel across worlds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod backend;
mod best;
mod count;
mod cpu;
mod grid;
mod play;
mod replicator;

pub use backend::{Backend, ReplicatorParams};
pub use cpu::CpuBackend;
