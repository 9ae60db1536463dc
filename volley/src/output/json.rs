use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write as _;
use std::sync::Arc;

use super::OutputFormatter;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_header(&self, config: &volley_core::RunConfig) {
        let line = build_header_line(config);
        emit_json_line(&line);
    }

    fn progress(&self) -> Option<volley_core::ProgressFn> {
        Some(Arc::new(move |u| {
            let line = build_progress_line(&u);
            emit_json_line(&line);
        }))
    }

    fn print_summary(&self, report: &volley_core::RunReport) -> anyhow::Result<()> {
        let line = build_summary_line(report);
        emit_json_line(&line);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonHeaderLine {
    pub kind: &'static str,
    pub target: String,
    pub endpoints: Vec<String>,
    pub duration_secs: f64,
    pub rate: f64,
    pub timeout_ms: u64,
}

fn build_header_line(config: &volley_core::RunConfig) -> JsonHeaderLine {
    JsonHeaderLine {
        kind: "header",
        target: config.base_url.clone(),
        endpoints: config.endpoints.clone(),
        duration_secs: config.duration.as_secs_f64(),
        rate: config.rate,
        timeout_ms: config.request_timeout.as_millis() as u64,
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonProgressLine {
    pub kind: &'static str,
    pub tick: u64,
    pub elapsed_secs: f64,
    pub interval_secs: f64,

    pub requests_per_sec: f64,

    pub issued_total: u64,
    pub success_total: u64,
    pub failed_total: u64,
}

fn build_progress_line(u: &volley_core::ProgressUpdate) -> JsonProgressLine {
    JsonProgressLine {
        kind: "progress",
        tick: u.tick,
        elapsed_secs: u.elapsed.as_secs_f64(),
        interval_secs: u.interval.as_secs_f64(),

        requests_per_sec: u.rps_now,

        issued_total: u.issued_total,
        success_total: u.success_total,
        failed_total: u.failed_total,
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSummaryLine {
    pub kind: &'static str,
    pub totals: JsonTotals,
    pub latency: Option<JsonLatencySummary>,
    pub errors: BTreeMap<String, u64>,
    pub observed_duration_secs: f64,
    pub observed_throughput: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonTotals {
    pub total_requests: u64,
    pub success_count: u64,
    pub failure_count: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonLatencySummary {
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

fn build_summary_line(report: &volley_core::RunReport) -> JsonSummaryLine {
    let latency = (report.success_count > 0).then(|| JsonLatencySummary {
        min_ms: report.latency.min_ms,
        max_ms: report.latency.max_ms,
        mean_ms: report.latency.mean_ms,
        p50_ms: report.latency.p50_ms,
        p95_ms: report.latency.p95_ms,
        p99_ms: report.latency.p99_ms,
    });

    JsonSummaryLine {
        kind: "summary",
        totals: JsonTotals {
            total_requests: report.total_requests,
            success_count: report.success_count,
            failure_count: report.failure_count,
        },
        latency,
        errors: report.error_breakdown.clone(),
        observed_duration_secs: report.observed_duration.as_secs_f64(),
        observed_throughput: report.observed_throughput,
    }
}

fn emit_json_line<T: Serialize>(line: &T) {
    let mut out = std::io::stdout().lock();
    if serde_json::to_writer(&mut out, line).is_ok() {
        let _ = writeln!(out);
    }
}
