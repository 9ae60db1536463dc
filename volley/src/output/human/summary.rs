use std::fmt::Write as _;

use super::format::{format_ms, format_percent, format_rate};

pub(crate) fn render(report: &volley_core::RunReport) -> String {
    let mut out = String::new();

    out.push_str("summary\n");
    writeln!(
        &mut out,
        "  duration: {:.2}s",
        report.observed_duration.as_secs_f64()
    )
    .ok();
    writeln!(
        &mut out,
        "  requests: {} (ok {} [{}], failed {} [{}])",
        report.total_requests,
        report.success_count,
        format_percent(report.success_rate()),
        report.failure_count,
        format_percent(failure_rate(report)),
    )
    .ok();
    writeln!(
        &mut out,
        "  throughput: {} req/s",
        format_rate(report.observed_throughput)
    )
    .ok();

    if report.success_count > 0 {
        let l = &report.latency;
        writeln!(
            &mut out,
            "  latency: min={} mean={} max={}",
            format_ms(l.min_ms),
            format_ms(l.mean_ms),
            format_ms(l.max_ms)
        )
        .ok();
        writeln!(
            &mut out,
            "  percentiles: p50={} p95={} p99={}",
            format_ms(l.p50_ms),
            format_ms(l.p95_ms),
            format_ms(l.p99_ms)
        )
        .ok();
    } else {
        out.push_str("  latency: n/a\n");
    }

    if !report.error_breakdown.is_empty() {
        out.push_str("  errors:\n");
        let mut rows: Vec<(&String, &u64)> = report.error_breakdown.iter().collect();
        rows.sort_by(|(a_key, a_count), (b_key, b_count)| {
            b_count
                .cmp(a_count)
                .then_with(|| a_key.as_str().cmp(b_key.as_str()))
        });
        for (key, count) in rows {
            writeln!(&mut out, "    {key}: {count}").ok();
        }
    }

    out
}

fn failure_rate(report: &volley_core::RunReport) -> f64 {
    if report.total_requests == 0 {
        return 0.0;
    }
    (report.failure_count as f64) / (report.total_requests as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use volley_core::{LatencyStats, RunReport};

    fn report() -> RunReport {
        RunReport {
            total_requests: 100,
            success_count: 90,
            failure_count: 10,
            latency: LatencyStats {
                min_ms: 1.0,
                max_ms: 40.0,
                mean_ms: 5.5,
                p50_ms: 4.0,
                p95_ms: 20.0,
                p99_ms: 35.0,
            },
            error_breakdown: [("500".to_string(), 6), ("timeout".to_string(), 4)]
                .into_iter()
                .collect(),
            observed_duration: Duration::from_secs(10),
            observed_throughput: 10.0,
        }
    }

    #[test]
    fn render_includes_totals_latency_and_errors() {
        let text = render(&report());
        assert!(text.contains("duration: 10.00s"));
        assert!(text.contains("requests: 100 (ok 90 [90.00%], failed 10 [10.00%])"));
        assert!(text.contains("throughput: 10.00 req/s"));
        assert!(text.contains("latency: min=1.00ms mean=5.50ms max=40.00ms"));
        assert!(text.contains("percentiles: p50=4.00ms p95=20.00ms p99=35.00ms"));
        assert!(text.contains("errors:"));
        // Sorted by count descending, then key.
        let idx_500 = text.find("500: 6").unwrap_or(usize::MAX);
        let idx_timeout = text.find("timeout: 4").unwrap_or(0);
        assert!(idx_500 < idx_timeout);
    }

    #[test]
    fn render_without_successes_shows_latency_na() {
        let report = RunReport {
            total_requests: 5,
            success_count: 0,
            failure_count: 5,
            latency: LatencyStats::default(),
            error_breakdown: [("500".to_string(), 5)].into_iter().collect(),
            observed_duration: Duration::from_secs(1),
            observed_throughput: 5.0,
        };

        let text = render(&report);
        assert!(text.contains("latency: n/a"));
        assert!(!text.contains("percentiles:"));
    }

    #[test]
    fn render_without_errors_omits_breakdown() {
        let mut r = report();
        r.error_breakdown = BTreeMap::new();
        r.failure_count = 0;
        r.success_count = 100;

        let text = render(&r);
        assert!(!text.contains("errors:"));
    }
}
