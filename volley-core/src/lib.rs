mod config;
mod driver;
mod error;
mod outcome;
mod progress;
mod report;
mod stats;

pub use config::{
    DEFAULT_DURATION, DEFAULT_ENDPOINTS, DEFAULT_RATE, DEFAULT_REQUEST_TIMEOUT, RunConfig,
};
pub use driver::run;
pub use error::{Error, Result};
pub use outcome::{RequestOutcome, RequestResult};
pub use progress::{ProgressFn, ProgressUpdate};
pub use report::{LatencyStats, RunReport};
pub use stats::RunStats;
pub use volley_http::{HttpClient, TransportErrorKind};
