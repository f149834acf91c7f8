//! Run orchestration: configuration, the per-pass task graph, and the
//! background run worker.
//!
//! An [`Engine`] pairs a validated [`EngineConfig`] with a
//! [`Backend`](dilemma_backend::Backend) and executes runs described by a
//! [`RunSpec`]. Each pass forks Count and Play over the authoritative
//! "before" lattice, joins, applies the configured update into "after",
//! and swaps roles. Runs execute on a dedicated worker thread; the
//! returned [`RunHandle`] supports cancellation via
//! [`abort`](RunHandle::abort) and a single blocking
//! [`join`](RunHandle::join).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod draws;
mod metrics;
mod run;

pub use config::{ConfigError, EngineConfig, RunSpec, DEFAULT_MUTATION_THRESHOLD};
pub use draws::{ChaChaDraws, DrawPurpose, DrawSource};
pub use metrics::RunMetrics;
pub use run::{Engine, RunError, RunHandle, RunOutput};
