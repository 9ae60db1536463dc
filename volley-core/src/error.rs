pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`duration` must be a positive duration")]
    InvalidDuration,

    #[error("`rate` must be a positive number of requests per second")]
    InvalidRate,

    #[error("`timeout` must be a positive duration")]
    InvalidTimeout,

    #[error("`endpoints` must be a non-empty list of paths")]
    EmptyEndpoints,

    #[error("invalid target url (expected http:// or https://): {0}")]
    InvalidTargetUrl(String),

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
