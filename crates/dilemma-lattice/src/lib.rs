//! Buffer ownership for dilemma simulations.
//!
//! One run owns four kinds of storage: the two strategy grids of the
//! [`DoubleBuffer`] (ping-pong "before"/"after"), a [`RewardGrid`] rewritten
//! every pass, and the [`CooperationHistory`] of per-world cooperator counts.
//! All allocation goes through `try_reserve` so that an oversized request
//! surfaces as [`LatticeError::AllocationFailed`] instead of aborting.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod batch;
mod double;
mod error;
mod history;
mod rewards;

pub use batch::{try_zeroed, LatticeBatch};
pub use double::DoubleBuffer;
pub use error::LatticeError;
pub use history::CooperationHistory;
pub use rewards::RewardGrid;
