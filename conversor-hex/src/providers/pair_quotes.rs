//! Per-pair bid quotes keyed like `"USDBRL": { "bid": "5.42", ... }`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use conversor_types::{CurrencyCode, ProviderError, RateSnapshot, SnapshotSource};

use super::{RateProvider, numeric, unix_seconds};

const AWESOME_API_URL: &str =
    "https://economia.awesomeapi.com.br/json/last/USD-BRL,EUR-BRL,GBP-BRL,JPY-BRL";

/// Quoted pairs and the factor each bid is divided by.
/// JPY is quoted per 100 yen.
const QUOTED_PAIRS: [(CurrencyCode, &str, f64); 4] = [
    (CurrencyCode::USD, "USDBRL", 1.0),
    (CurrencyCode::EUR, "EURBRL", 1.0),
    (CurrencyCode::GBP, "GBPBRL", 1.0),
    (CurrencyCode::JPY, "JPYBRL", 100.0),
];

/// Currencies the API does not quote, approximated as fixed multiples of the
/// USD rate. These are not market data.
const USD_MULTIPLES: [(CurrencyCode, f64); 5] = [
    (CurrencyCode::CAD, 0.74),
    (CurrencyCode::AUD, 0.66),
    (CurrencyCode::CHF, 1.14),
    (CurrencyCode::CNY, 0.14),
    (CurrencyCode::ARS, 0.001),
];

/// Provider answering with one bid quote per `XXXBRL` pair.
#[derive(Debug, Clone)]
pub struct PairQuoteProvider {
    name: String,
    endpoint: String,
}

impl PairQuoteProvider {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn awesome_api() -> Self {
        Self::new("AwesomeAPI", AWESOME_API_URL)
    }
}

#[async_trait::async_trait]
impl RateProvider for PairQuoteProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn normalize(&self, body: &Value, now: DateTime<Utc>) -> Result<RateSnapshot, ProviderError> {
        let quotes = body.as_object().ok_or_else(|| {
            ProviderError::malformed(&self.name, "expected an object of pair quotes")
        })?;

        let mut rates = BTreeMap::new();
        for (code, pair, scale) in QUOTED_PAIRS {
            rates.insert(code, bid(quotes.get(pair)) / scale);
        }

        let usd = rates.get(&CurrencyCode::USD).copied().unwrap_or_default();
        if usd > 0.0 {
            for (code, factor) in USD_MULTIPLES {
                rates.insert(code, usd * factor);
            }
        }

        let timestamp = unix_seconds(quotes.get("USDBRL").and_then(|q| q.get("timestamp")))
            .unwrap_or(now);

        Ok(RateSnapshot::new(
            rates,
            timestamp,
            SnapshotSource::Provider {
                name: self.name.clone(),
            },
        ))
    }
}

/// Bid price of a quote; missing or unparsable bids count as zero.
fn bid(quote: Option<&Value>) -> f64 {
    numeric(quote.and_then(|q| q.get("bid"))).unwrap_or_default()
}
