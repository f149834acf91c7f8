//! Per-run performance metrics.

/// Timing and memory data accumulated over one run.
///
/// All durations are in microseconds, accumulated across passes. Count and
/// Play run concurrently, so their times may overlap wall-clock-wise;
/// `total_us` is the wall-clock time of the whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Number of passes executed.
    pub passes: u64,
    /// Accumulated time in the Count stage, in microseconds.
    pub count_us: u64,
    /// Accumulated time in the Play stage, in microseconds.
    pub play_us: u64,
    /// Accumulated time in the Update stage, in microseconds.
    pub update_us: u64,
    /// Wall-clock time for the entire run, in microseconds.
    pub total_us: u64,
    /// Bytes held by the run's buffers (lattices, rewards, draws, history).
    pub memory_bytes: usize,
}
