use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);
pub const DEFAULT_RATE: f64 = 100.0;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_ENDPOINTS: [&str; 4] =
    ["/health", "/api/info", "/api/comparison", "/api/metrics"];

/// Immutable configuration for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Scheme + host + port of the system under test.
    pub base_url: String,
    /// Non-empty set of paths to sample from, uniformly at random.
    pub endpoints: Vec<String>,
    /// Total wall-clock test length.
    pub duration: Duration,
    /// Target requests issued per second.
    pub rate: f64,
    /// Per-request deadline.
    pub request_timeout: Duration,
}

impl RunConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            duration: DEFAULT_DURATION,
            rate: DEFAULT_RATE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Fails fast on malformed configuration, before any request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.duration.is_zero() {
            return Err(Error::InvalidDuration);
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(Error::InvalidRate);
        }
        if self.request_timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        if self.endpoints.is_empty() {
            return Err(Error::EmptyEndpoints);
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|_| Error::InvalidTargetUrl(self.base_url.clone()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::InvalidTargetUrl(self.base_url.clone()));
        }

        Ok(())
    }

    /// Nominal inter-request interval for the scheduling loop.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate)
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
