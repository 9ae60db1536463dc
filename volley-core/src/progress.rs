use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Monotonic tick counter (1-based) for progress emissions.
    pub tick: u64,
    /// Elapsed wall-clock time since run start.
    pub elapsed: Duration,
    /// Actual length of the interval this tick covers.
    pub interval: Duration,
    /// Requests dispatched so far.
    pub issued_total: u64,
    /// Requests completed with a success classification so far.
    pub success_total: u64,
    /// Requests completed with a failure classification so far.
    pub failed_total: u64,
    /// Completions/sec observed during the last progress interval.
    pub rps_now: f64,
}

pub type ProgressFn = std::sync::Arc<dyn Fn(ProgressUpdate) + Send + Sync + 'static>;
