//! Issuing a single request against the target.

use crate::config::{BenchmarkConfig, Method};
use crate::error::{Error, RequestFailure};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::{Duration, Instant};

/// One shared client per benchmark run, pooled for the configured
/// concurrency. The per-request timeout is enforced by the transport.
pub(crate) fn build_client(config: &BenchmarkConfig) -> Result<Client, Error> {
    let client = Client::builder()
        .pool_max_idle_per_host(config.concurrency)
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

fn is_success(status: u16) -> bool {
    (200..400).contains(&status)
}

#[derive(Debug, Clone)]
pub(crate) enum RequestOutcome {
    Success { latency: Duration },
    Failure(RequestFailure),
}

/// The one fixed request shape a run issues repeatedly, cloneable into
/// each worker.
#[derive(Debug, Clone)]
pub(crate) struct RequestTemplate {
    client: Client,
    method: Method,
    url: String,
    body: Option<String>,
}

impl RequestTemplate {
    pub fn new(client: Client, config: &BenchmarkConfig) -> Self {
        Self {
            client,
            method: config.method,
            url: config.target.clone(),
            body: config.body.clone(),
        }
    }

    /// Issue the request once and classify the outcome: status codes in
    /// `[200, 400)` are success, everything else is a tagged failure.
    pub async fn issue(&self) -> RequestOutcome {
        match self.probe().await {
            Ok((latency, status)) if is_success(status) => RequestOutcome::Success { latency },
            Ok((_, status)) => RequestOutcome::Failure(RequestFailure::Status(status)),
            Err(failure) => RequestOutcome::Failure(failure),
        }
    }

    /// Send once, measuring from just before the call until the body has
    /// been fully received. Any received response is returned with its
    /// status; only transport problems come back as failures.
    pub async fn probe(&self) -> Result<(Duration, u16), RequestFailure> {
        let start = Instant::now();
        let status = self.send().await.map_err(classify)?;
        Ok((start.elapsed(), status))
    }

    async fn send(&self) -> Result<u16, reqwest::Error> {
        let mut request = match self.method {
            Method::Get => self.client.get(&self.url),
            Method::Post => self.client.post(&self.url),
            Method::Put => self.client.put(&self.url),
            Method::Delete => self.client.delete(&self.url),
        };
        if matches!(self.method, Method::Post | Method::Put) {
            if let Some(body) = &self.body {
                request = request
                    .body(body.clone())
                    .header(CONTENT_TYPE, "application/json");
            }
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        // Latency covers the whole response, not just the headers.
        response.bytes().await?;
        Ok(status)
    }
}

fn classify(err: reqwest::Error) -> RequestFailure {
    if err.is_timeout() {
        RequestFailure::Timeout
    } else if err.is_connect() {
        RequestFailure::Connect(root_cause(&err))
    } else {
        RequestFailure::Other(error_kind(&err).to_string())
    }
}

/// Innermost source message, so connect tags carry the OS-level detail
/// rather than reqwest's url-laden wrapper text.
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut cause = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}

fn error_kind(err: &reqwest::Error) -> &'static str {
    if err.is_body() {
        "body"
    } else if err.is_decode() {
        "decode"
    } else if err.is_redirect() {
        "redirect"
    } else if err.is_request() {
        "request"
    } else {
        "unknown"
    }
}
