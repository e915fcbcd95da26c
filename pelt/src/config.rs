//! Benchmark run configuration.

use crate::error::Error;
use reqwest::Url;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default target, the local health endpoint.
pub const DEFAULT_TARGET: &str = "http://127.0.0.1:3000/health";

/// The warmup phase never uses more workers than this, whatever the
/// configured concurrency.
pub const WARMUP_CONCURRENCY_CAP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// Immutable input for one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub target: String,
    pub method: Method,
    pub body: Option<String>,
    pub duration: Duration,
    pub concurrency: usize,
    pub warmup: Duration,
    pub timeout: Duration,
}

impl BenchmarkConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            method: Method::Get,
            body: None,
            duration: Duration::from_secs(10),
            concurrency: 50,
            warmup: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Request body, sent for POST and PUT only.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Length of the measurement phase.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Length of the warmup phase; zero skips warmup entirely.
    pub fn warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Per-request timeout. Also bounds how long a phase drain can take.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fatal configuration problems are caught here, before any phase runs.
    pub fn validate(&self) -> Result<(), Error> {
        let url = Url::parse(&self.target).map_err(|err| Error::InvalidTarget {
            url: self.target.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidTarget {
                url: self.target.clone(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        if self.concurrency == 0 {
            return Err(Error::ZeroConcurrency);
        }
        Ok(())
    }

    pub(crate) fn warmup_concurrency(&self) -> usize {
        self.concurrency.min(WARMUP_CONCURRENCY_CAP)
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}
