use thiserror::Error;

/// Fatal setup problems, reported before any phase starts.
///
/// Per-request failures are deliberately not represented here; they are
/// tracked as [`RequestFailure`] tags and folded into the run's aggregate
/// counts instead of aborting it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid HTTP method `{0}` (expected GET, POST, PUT or DELETE)")]
    InvalidMethod(String),

    #[error("invalid target URL `{url}`: {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}

/// Classification of one failed request.
///
/// The `Display` form is the categorical tag carried into reports, so
/// distinct failure modes stay distinguishable in aggregate output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("timeout")]
    Timeout,

    #[error("connect_error:{0}")]
    Connect(String),

    #[error("http_{0}")]
    Status(u16),

    #[error("error:{0}")]
    Other(String),
}
