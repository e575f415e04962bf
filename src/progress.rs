// src/progress.rs
/// Progress reporting for a verification run.
/// Frontends implement this to surface status while workers finish.
///
/// Called from the collecting thread only, in completion order.
pub trait Progress {
    /// Called at the start with the number of targets.
    fn begin(&mut self, _total: usize) {}

    /// A target produced a report and every check passed.
    fn target_done(&mut self, _name: &str) {}

    /// A target produced a report with at least one failure.
    fn target_failed(&mut self, _name: &str) {}

    /// Called once all workers have joined.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
