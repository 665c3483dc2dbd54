//! Exchange-rate providers.
//!
//! Each upstream API answers in its own shape. A provider knows its endpoint
//! and how to normalize that shape into a BRL-based [`RateSnapshot`]; fetching
//! goes through the injected [`JsonFetcher`] port.

mod pair_quotes;
mod usd_table;

use chrono::{DateTime, Utc};
use serde_json::Value;

use conversor_types::{Clock, JsonFetcher, ProviderError, RateSnapshot};

pub use pair_quotes::PairQuoteProvider;
pub use usd_table::UsdTableProvider;

/// Port-facing view of an exchange-rate API.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Human-readable name, used in logs and as the snapshot source.
    fn name(&self) -> &str;

    fn endpoint(&self) -> &str;

    /// Turns a decoded response body into a snapshot.
    ///
    /// `now` stamps the snapshot when the body carries no quote time.
    fn normalize(&self, body: &Value, now: DateTime<Utc>) -> Result<RateSnapshot, ProviderError>;

    /// Fetches the endpoint and normalizes the body.
    async fn fetch(
        &self,
        fetcher: &dyn JsonFetcher,
        clock: &dyn Clock,
    ) -> Result<RateSnapshot, ProviderError> {
        let body = fetcher
            .fetch_json(self.endpoint())
            .await
            .map_err(|err| ProviderError::from_fetch(self.name(), err))?;
        self.normalize(&body, clock.now())
    }
}

/// The provider chain in priority order.
pub fn default_providers() -> Vec<Box<dyn RateProvider>> {
    vec![
        Box::new(PairQuoteProvider::awesome_api()),
        Box::new(UsdTableProvider::exchange_rate_api()),
        Box::new(UsdTableProvider::open_er_api()),
    ]
}

/// A finite JSON number or numeric string.
fn numeric(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Seconds since the epoch, as a JSON number or numeric string.
fn unix_seconds(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let secs = match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_chain_order() {
        let names: Vec<String> = default_providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["AwesomeAPI", "ExchangeRate-API", "Open Exchange Rates"]
        );
    }

    #[test]
    fn test_unix_seconds() {
        let expected = DateTime::from_timestamp(1_700_000_000, 0);
        assert_eq!(unix_seconds(Some(&json!(1_700_000_000))), expected);
        assert_eq!(unix_seconds(Some(&json!("1700000000"))), expected);
        assert_eq!(unix_seconds(Some(&json!("soon"))), None);
        assert_eq!(unix_seconds(Some(&json!(0))), None);
        assert_eq!(unix_seconds(None), None);
    }
}
