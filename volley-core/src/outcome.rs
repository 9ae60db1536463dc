use std::sync::Arc;
use std::time::Duration;

use volley_http::{HttpResponse, TransportErrorKind};

/// Classification of a completed or failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestResult {
    /// HTTP response with status in [200, 300).
    Success(u16),
    /// HTTP response with any other status. Counts as failure.
    HttpError(u16),
    /// Connection-level failure (refused, reset, DNS, ...). Counts as failure.
    NetworkError(TransportErrorKind),
    /// No response within the per-request deadline. Counts as failure.
    Timeout,
}

impl RequestResult {
    pub fn classify(res: &volley_http::Result<HttpResponse>) -> Self {
        match res {
            Ok(response) if (200..300).contains(&response.status) => {
                Self::Success(response.status)
            }
            Ok(response) => Self::HttpError(response.status),
            Err(err) if err.is_timeout() => Self::Timeout,
            Err(err) => Self::NetworkError(err.transport_error_kind()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Aggregation key for the error breakdown. `None` for successes.
    #[must_use]
    pub fn classifier(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::HttpError(status) => Some(status.to_string()),
            Self::NetworkError(kind) => Some(kind.to_string()),
            Self::Timeout => Some("timeout".to_string()),
        }
    }
}

/// One record per attempted request, immutable once produced.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    /// Which configured path was requested.
    pub endpoint: Arc<str>,
    /// Offset from run start at dispatch time.
    pub issued_at: Duration,
    /// Elapsed until completion or failure (measured up to the point of failure).
    pub latency: Duration,
    pub result: RequestResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn response(status: u16) -> volley_http::Result<HttpResponse> {
        Ok(HttpResponse {
            status,
            body: Bytes::new(),
        })
    }

    #[test]
    fn classifies_2xx_as_success() {
        assert_eq!(
            RequestResult::classify(&response(200)),
            RequestResult::Success(200)
        );
        assert_eq!(
            RequestResult::classify(&response(299)),
            RequestResult::Success(299)
        );
    }

    #[test]
    fn classifies_non_2xx_as_http_error() {
        assert_eq!(
            RequestResult::classify(&response(199)),
            RequestResult::HttpError(199)
        );
        assert_eq!(
            RequestResult::classify(&response(300)),
            RequestResult::HttpError(300)
        );
        assert_eq!(
            RequestResult::classify(&response(500)),
            RequestResult::HttpError(500)
        );
    }

    #[test]
    fn classifies_timeout_separately_from_network_errors() {
        let timed_out: volley_http::Result<HttpResponse> =
            Err(volley_http::Error::Timeout(Duration::from_millis(100)));
        assert_eq!(RequestResult::classify(&timed_out), RequestResult::Timeout);

        let bad_url: volley_http::Result<HttpResponse> =
            Err(volley_http::Error::InvalidUrl("nope".to_string()));
        assert_eq!(
            RequestResult::classify(&bad_url),
            RequestResult::NetworkError(TransportErrorKind::InvalidUrl)
        );
    }

    #[test]
    fn classifier_keys_match_reporting_contract() {
        assert_eq!(RequestResult::Success(204).classifier(), None);
        assert_eq!(
            RequestResult::HttpError(503).classifier(),
            Some("503".to_string())
        );
        assert_eq!(
            RequestResult::NetworkError(TransportErrorKind::Connect).classifier(),
            Some("connect".to_string())
        );
        assert_eq!(
            RequestResult::Timeout.classifier(),
            Some("timeout".to_string())
        );
    }
}
