//! USD-based rate tables: `{ "rates": { "BRL": 5.42, "EUR": 0.92, ... } }`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use conversor_types::{CurrencyCode, ProviderError, RateSnapshot, SnapshotSource};

use super::{RateProvider, numeric, unix_seconds};

const EXCHANGE_RATE_API_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
const OPEN_ER_API_URL: &str = "https://open.er-api.com/v6/latest/USD";

/// BRL per USD assumed when the table has no BRL entry.
// NOTE: historical constant kept for compatibility; not derived from live data.
const DEFAULT_USD_TO_BRL: f64 = 5.42;

/// Provider answering with "units of X per 1 USD", re-based here onto BRL.
#[derive(Debug, Clone)]
pub struct UsdTableProvider {
    name: String,
    endpoint: String,
}

impl UsdTableProvider {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn exchange_rate_api() -> Self {
        Self::new("ExchangeRate-API", EXCHANGE_RATE_API_URL)
    }

    pub fn open_er_api() -> Self {
        Self::new("Open Exchange Rates", OPEN_ER_API_URL)
    }
}

#[async_trait::async_trait]
impl RateProvider for UsdTableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn normalize(&self, body: &Value, now: DateTime<Utc>) -> Result<RateSnapshot, ProviderError> {
        let root = body
            .as_object()
            .ok_or_else(|| ProviderError::malformed(&self.name, "expected a JSON object"))?;

        let empty = Map::new();
        let table = match root.get("rates") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(table)) => table,
            Some(_) => return Err(ProviderError::malformed(&self.name, "`rates` is not an object")),
        };

        let usd_to_brl = per_usd(table, CurrencyCode::BRL).unwrap_or(DEFAULT_USD_TO_BRL);

        let mut rates = BTreeMap::new();
        rates.insert(CurrencyCode::USD, usd_to_brl);
        for &code in CurrencyCode::all() {
            if code == CurrencyCode::BRL || code == CurrencyCode::USD {
                continue;
            }
            let rebased = per_usd(table, code).map_or(0.0, |units| usd_to_brl / units);
            rates.insert(code, rebased);
        }

        let timestamp = unix_seconds(root.get("time_last_update_unix")).unwrap_or(now);

        Ok(RateSnapshot::new(
            rates,
            timestamp,
            SnapshotSource::Provider {
                name: self.name.clone(),
            },
        ))
    }
}

/// Units of `code` per USD, as a number or numeric string; `None` when
/// absent, zero or unparsable.
fn per_usd(table: &Map<String, Value>, code: CurrencyCode) -> Option<f64> {
    numeric(table.get(code.code())).filter(|units| *units != 0.0)
}
