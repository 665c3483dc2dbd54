//! # Conversor Client
//!
//! Outbound adapters for the converter ports: a reqwest-backed
//! [`JsonFetcher`] and the system [`Clock`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, header};

use conversor_types::{Clock, FetchError, JsonFetcher};

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for adapter construction.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// JSON fetcher over HTTP.
///
/// Every request carries `Accept: application/json` and is bounded by the
/// configured timeout, so a slow provider cannot stall the chain.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("conversor/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait::async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let resp = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(transport_error)?;
        serde_json::from_str(&body).map_err(|err| FetchError::InvalidJson(err.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
