//! Double-buffered strategy state with ping-pong role exchange.

use dilemma_core::BatchShape;

use crate::batch::LatticeBatch;
use crate::error::LatticeError;

/// Two same-shape strategy batches alternating "before"/"after" roles.
///
/// Exactly one batch is the authoritative current state (`before`) at all
/// times. An update pass reads `before` and writes `after` through the
/// disjoint borrows handed out by [`split`](Self::split); the borrow checker
/// therefore rules out any read of the in-progress buffer. [`swap`](Self::swap)
/// exchanges the roles without copying cell data.
#[derive(Debug)]
pub struct DoubleBuffer {
    before: LatticeBatch,
    after: LatticeBatch,
}

impl DoubleBuffer {
    /// Allocate both buffers zero-filled (all defect).
    pub fn zeroed(shape: BatchShape) -> Result<Self, LatticeError> {
        Ok(Self {
            before: LatticeBatch::zeroed(shape)?,
            after: LatticeBatch::zeroed(shape)?,
        })
    }

    /// Take `initial` as the starting `before`; `after` is zero-filled.
    pub fn from_initial(initial: LatticeBatch) -> Result<Self, LatticeError> {
        let after = LatticeBatch::zeroed(initial.shape())?;
        Ok(Self {
            before: initial,
            after,
        })
    }

    /// The authoritative current state.
    pub fn before(&self) -> &LatticeBatch {
        &self.before
    }

    /// Disjoint borrows for one pass: read `before`, write `after`.
    pub fn split(&mut self) -> (&LatticeBatch, &mut LatticeBatch) {
        (&self.before, &mut self.after)
    }

    /// Exchange buffer roles. The just-written `after` becomes the new
    /// authoritative `before`; no cell data moves.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.before, &mut self.after);
    }

    /// Consume the pair, returning the authoritative state.
    pub fn into_before(self) -> LatticeBatch {
        self.before
    }
}
