use std::collections::BTreeMap;
use std::time::Duration;

use crate::outcome::RequestOutcome;

/// Latency distribution over successful outcomes, in milliseconds.
///
/// All fields are zero when the run produced no successful outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatencyStats {
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

/// Summary of a completed run, derived once from the frozen outcome set.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub total_requests: u64,
    pub success_count: u64,
    pub failure_count: u64,
    pub latency: LatencyStats,
    /// Error classifier (status code, transport error kind, or "timeout")
    /// mapped to occurrence count.
    pub error_breakdown: BTreeMap<String, u64>,
    pub observed_duration: Duration,
    /// total_requests / observed_duration, in requests per second.
    pub observed_throughput: f64,
}

impl RunReport {
    pub fn from_outcomes(outcomes: &[RequestOutcome], observed_duration: Duration) -> Self {
        let mut success_latencies_ms: Vec<f64> = Vec::with_capacity(outcomes.len());
        let mut error_breakdown: BTreeMap<String, u64> = BTreeMap::new();

        for outcome in outcomes {
            match outcome.result.classifier() {
                None => success_latencies_ms.push(outcome.latency.as_secs_f64() * 1000.0),
                Some(key) => *error_breakdown.entry(key).or_insert(0) += 1,
            }
        }

        success_latencies_ms.sort_by(f64::total_cmp);

        let total_requests = outcomes.len() as u64;
        let success_count = success_latencies_ms.len() as u64;
        let failure_count = total_requests - success_count;

        let latency = if success_latencies_ms.is_empty() {
            LatencyStats::default()
        } else {
            let n = success_latencies_ms.len();
            let sum: f64 = success_latencies_ms.iter().sum();
            LatencyStats {
                min_ms: success_latencies_ms[0],
                max_ms: success_latencies_ms[n - 1],
                mean_ms: sum / (n as f64),
                p50_ms: percentile(&success_latencies_ms, 0.50),
                p95_ms: percentile(&success_latencies_ms, 0.95),
                p99_ms: percentile(&success_latencies_ms, 0.99),
            }
        };

        let secs = observed_duration.as_secs_f64().max(1e-9);

        Self {
            total_requests,
            success_count,
            failure_count,
            latency,
            error_breakdown,
            observed_duration,
            observed_throughput: (total_requests as f64) / secs,
        }
    }

    /// Fraction of requests that succeeded, in [0, 1]. Zero for an empty run.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        (self.success_count as f64) / (self.total_requests as f64)
    }
}

/// Index-based (non-interpolated) percentile: the value at `floor(n * p)`
/// in the ascending-sorted sample, clamped to the last valid index.
///
/// This exact definition is the reporting contract; interpolating would
/// break comparability between runs.
fn percentile(sorted_ms: &[f64], p: f64) -> f64 {
    if sorted_ms.is_empty() {
        return 0.0;
    }
    let idx = ((sorted_ms.len() as f64) * p).floor() as usize;
    sorted_ms[idx.min(sorted_ms.len() - 1)]
}
