use clap::{Args, Parser, Subcommand};
use std::time::Duration;

fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("duration cannot be empty (expected e.g. 10s, 250ms, 1m)".to_string());
    }

    let number_end = s
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(s.len(), |(idx, _)| idx);

    if number_end == 0 {
        return Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        ));
    }

    let (number_str, unit_str) = s.split_at(number_end);
    let value: u64 = number_str
        .parse()
        .map_err(|_| format!("invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"))?;

    let unit = unit_str.trim();
    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => Ok(Duration::from_secs(value)),
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => {
            Ok(Duration::from_millis(value))
        }
        "m" | "min" | "mins" | "minute" | "minutes" => {
            let secs = value
                .checked_mul(60)
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        "h" | "hr" | "hrs" | "hour" | "hours" => {
            let secs = value
                .checked_mul(60)
                .and_then(|v| v.checked_mul(60))
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        _ => Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        )),
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    HumanReadable,
    /// Emit JSON progress lines (NDJSON) to stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "volley",
    author,
    version,
    about = "Fixed-rate HTTP load generator",
    long_about = "volley issues GET requests at a target rate against a chosen endpoint set for a fixed duration, then reports latency percentiles, throughput, and an error breakdown.\n\nThe target rate is an intent, not a guarantee: under severe latency or contention the achieved rate may be lower, which is measured and reported rather than treated as an error.",
    after_help = "Examples:\n  volley run http://localhost:8080\n  volley run http://localhost:8080 --duration 10s --rps 200\n  volley run http://localhost:8080 --endpoint /health --endpoint /api/info\n  volley run http://localhost:8080 --timeout 500ms --output json"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a load test against a target base URL
    #[command(
        long_about = "Run a fixed-rate, fixed-duration load test. Per-request failures (HTTP error statuses, network errors, timeouts) are classified and counted; they never abort the run."
    )]
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Base URL of the target (scheme + host + port)
    pub url: String,

    /// Total test length (e.g. 10s, 250ms, 1m)
    #[arg(long, value_parser = parse_duration, default_value = "30s")]
    pub duration: Duration,

    /// Target requests per second
    #[arg(long, default_value_t = 100)]
    pub rps: u32,

    /// Per-request timeout (e.g. 5s, 500ms)
    #[arg(long, value_parser = parse_duration, default_value = "5s")]
    pub timeout: Duration,

    /// Endpoint path to sample from (repeatable; replaces the default set)
    #[arg(long = "endpoint", value_name = "PATH")]
    pub endpoints: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,
}
