//! Progress reporting during a scan.

/// Receives a tick after every completed base row.
///
/// With parallel scoring ticks arrive from worker threads, so `done` is
/// monotonic per call site but calls may interleave.
pub trait Progress: Sync {
    fn row_done(&self, done: usize, total: usize);
}

impl<F> Progress for F
where
    F: Fn(usize, usize) + Sync,
{
    fn row_done(&self, done: usize, total: usize) {
        self(done, total);
    }
}

/// Discards all ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn row_done(&self, _done: usize, _total: usize) {}
}
