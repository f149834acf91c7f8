//! Allocation errors for run-scoped buffers.

use std::error::Error;
use std::fmt;

/// Errors from lattice buffer allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// The allocator refused the requested buffer.
    AllocationFailed {
        /// Size of the refused request in bytes.
        requested_bytes: usize,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "buffer allocation of {requested_bytes} bytes failed")
            }
        }
    }
}

impl Error for LatticeError {}
