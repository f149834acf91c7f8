//! Benchmark profiles for the dilemma simulation engine.
//!
//! Provides pre-built configurations and lattices so the stage and
//! full-run benches measure the same workloads:
//!
//! - [`reference_config`]: Moore neighborhood, canonical payoffs
//! - [`reference_shape`]: 8 worlds of 100x100 (80K cells)
//! - [`checkerboard`]: deterministic mixed-strategy lattice

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dilemma_core::{BatchShape, Neighborhood, PayoffMatrix, UpdateRule};
use dilemma_engine::EngineConfig;
use dilemma_lattice::LatticeBatch;

/// Reference configuration: Moore neighborhood, T=10 R=7 S=0 P=0.
pub fn reference_config(update_rule: UpdateRule, seed: u64) -> EngineConfig {
    EngineConfig {
        neighborhood: Neighborhood::Moore,
        payoff: PayoffMatrix::new(10.0, 7.0, 0.0, 0.0),
        update_rule,
        seed,
        ..EngineConfig::default()
    }
}

/// Reference batch shape: 8 worlds of 100x100 cells.
pub fn reference_shape() -> BatchShape {
    BatchShape::new(8, 100).expect("reference shape fits in usize")
}

/// A deterministic mixed lattice: cooperate on even ranks, defect on odd.
pub fn checkerboard(shape: BatchShape) -> LatticeBatch {
    let cells = (0..shape.total_cells()).map(|i| (i % 2) as u8).collect();
    LatticeBatch::from_cells(shape, cells).expect("cell count matches shape")
}
