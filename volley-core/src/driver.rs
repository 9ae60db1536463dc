use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng as _;
use tokio::time::MissedTickBehavior;
use volley_http::{HttpClient, HttpRequest};

use crate::config::RunConfig;
use crate::error::Result;
use crate::outcome::{RequestOutcome, RequestResult};
use crate::progress::{ProgressFn, ProgressUpdate};
use crate::report::RunReport;
use crate::stats::RunStats;

/// Extra time allowed beyond the per-request timeout for in-flight requests
/// to finish during the drain phase.
const DRAIN_GRACE_MARGIN: Duration = Duration::from_secs(1);
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Drives a fixed-rate, fixed-duration stream of GET requests against the
/// configured target and returns the summary report.
///
/// Per-request failures are classified and counted, never propagated; the
/// run itself fails only on malformed configuration.
pub async fn run(config: RunConfig, progress: Option<ProgressFn>) -> Result<RunReport> {
    config.validate()?;

    let client = Arc::new(HttpClient::default());
    let stats = Arc::new(RunStats::default());

    let targets: Vec<(Arc<str>, Arc<str>)> = config
        .endpoints
        .iter()
        .map(|endpoint| {
            (
                Arc::<str>::from(endpoint.as_str()),
                Arc::<str>::from(config.endpoint_url(endpoint)),
            )
        })
        .collect();

    let started = Instant::now();
    let deadline = started + config.duration;

    let progress_handle = progress.map(|progress| {
        let stats = stats.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PROGRESS_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; consume it so the first
            // emission covers a full interval.
            interval.tick().await;

            let mut tick_id: u64 = 0;
            let mut last_at = Instant::now();
            let mut last_completed: u64 = 0;

            loop {
                interval.tick().await;

                tick_id = tick_id.saturating_add(1);
                let now = Instant::now();
                let dt = now.duration_since(last_at);
                last_at = now;

                let success_total = stats.success_total();
                let failed_total = stats.failed_total();
                let completed = success_total.saturating_add(failed_total);
                let delta = completed.saturating_sub(last_completed);
                last_completed = completed;
                let rps_now = (delta as f64) / dt.as_secs_f64().max(1e-9);

                (progress)(ProgressUpdate {
                    tick: tick_id,
                    elapsed: started.elapsed(),
                    interval: dt,
                    issued_total: stats.issued_total(),
                    success_total,
                    failed_total,
                    rps_now,
                });
            }
        })
    });

    // Scheduling loop: one dispatch per tick, never blocking on the request
    // itself. In-flight concurrency is bounded only by rate and latency.
    let expected = (config.rate * config.duration.as_secs_f64()).ceil() as usize;
    let mut handles = Vec::with_capacity(expected.min(1 << 20));

    let mut pacer = tokio::time::interval(config.interval());
    pacer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        pacer.tick().await;
        if Instant::now() >= deadline {
            break;
        }

        let idx = rand::rng().random_range(0..targets.len());
        let (endpoint, url) = targets[idx].clone();
        let issued_at = started.elapsed();

        stats.record_dispatch();

        let client = client.clone();
        let stats = stats.clone();
        let timeout = config.request_timeout;
        handles.push(tokio::spawn(async move {
            let request_started = Instant::now();
            let res = client
                .request(HttpRequest::get(&url).with_timeout(timeout))
                .await;
            let latency = request_started.elapsed();

            stats.record_outcome(RequestOutcome {
                endpoint,
                issued_at,
                latency,
                result: RequestResult::classify(&res),
            });
        }));
    }

    // Observed duration covers the scheduling window only; the drain phase
    // lets stragglers finish but does not count against throughput.
    let observed_duration = started.elapsed();

    let drain_deadline = Instant::now() + config.request_timeout + DRAIN_GRACE_MARGIN;
    while stats.in_flight() > 0 && Instant::now() < drain_deadline {
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }

    // Best-effort cancellation of anything still in flight past the grace
    // period; abandoned requests are not part of the frozen set. A join
    // error that is not a cancellation means a request task panicked and
    // is surfaced as a runtime failure.
    for handle in &handles {
        handle.abort();
    }
    for handle in handles {
        if let Err(err) = handle.await
            && !err.is_cancelled()
        {
            return Err(err.into());
        }
    }

    if let Some(handle) = progress_handle {
        handle.abort();
        if let Err(err) = handle.await
            && !err.is_cancelled()
        {
            return Err(err.into());
        }
    }

    let outcomes = stats.freeze();
    Ok(RunReport::from_outcomes(&outcomes, observed_duration))
}
