//! HTTP fetch port.

use crate::error::FetchError;

/// Port trait for retrieving a JSON document over HTTP.
///
/// Implementations issue a GET that asks for `application/json`, treat any
/// non-success status as an error and decode the body.
#[async_trait::async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}
