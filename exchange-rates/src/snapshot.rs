//! Normalized rate snapshot and the conversion engine built on it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{BASE_CURRENCY, CurrencyCode};

/// Raised by [`RateSnapshot::checked_conversion_rate`] when a leg is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Rate not available for {from} -> {to}")]
    RateUnavailable { from: CurrencyCode, to: CurrencyCode },
}

/// Where a snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotSource {
    /// Normalized from a live provider response.
    Provider { name: String },
    /// The static offline table.
    Fallback,
}

/// Provider-agnostic set of rates, each expressed as units of the base
/// currency (BRL) per one unit of the keyed currency.
///
/// The base currency always maps to exactly `1.0`. A missing entry, a zero or
/// a non-finite value all mean the rate is unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
    timestamp: DateTime<Utc>,
    source: SnapshotSource,
}

impl RateSnapshot {
    /// Builds a snapshot, forcing the base entry to `1.0`.
    pub fn new(
        mut rates: BTreeMap<CurrencyCode, f64>,
        timestamp: DateTime<Utc>,
        source: SnapshotSource,
    ) -> Self {
        rates.insert(BASE_CURRENCY, 1.0);
        Self {
            base: BASE_CURRENCY,
            rates,
            timestamp,
            source,
        }
    }

    /// The static offline table, stamped with `now`.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        let rates = CurrencyCode::all()
            .iter()
            .map(|&code| (code, code.fallback_rate()))
            .collect();
        Self::new(rates, now, SnapshotSource::Fallback)
    }

    pub fn base(&self) -> CurrencyCode {
        self.base
    }

    pub fn rates(&self) -> &BTreeMap<CurrencyCode, f64> {
        &self.rates
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SnapshotSource::Fallback
    }

    /// Returns the base-relative rate for `code` when it is known.
    pub fn rate(&self, code: CurrencyCode) -> Option<f64> {
        let rate = self.resolve(code);
        (rate > 0.0).then_some(rate)
    }

    /// Base-relative rate, or `0.0` for anything unknown.
    fn resolve(&self, code: CurrencyCode) -> f64 {
        if code == self.base {
            return 1.0;
        }
        match self.rates.get(&code) {
            Some(&rate) if rate.is_finite() && rate > 0.0 => rate,
            _ => 0.0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion Engine
    // ─────────────────────────────────────────────────────────────────────────

    /// Units of `to` obtained for one unit of `from`.
    ///
    /// Returns `0.0` when either leg is unknown; callers render that as
    /// "unavailable" rather than dividing by it.
    pub fn conversion_rate(&self, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return 1.0;
        }

        let from_rate = self.resolve(from);
        let to_rate = self.resolve(to);
        if from_rate == 0.0 || to_rate == 0.0 {
            return 0.0;
        }
        from_rate / to_rate
    }

    /// Like [`conversion_rate`](Self::conversion_rate) but reports the unknown case.
    pub fn checked_conversion_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<f64, ConversionError> {
        match self.conversion_rate(from, to) {
            rate if rate > 0.0 && rate.is_finite() => Ok(rate),
            _ => Err(ConversionError::RateUnavailable { from, to }),
        }
    }

    /// Converts `amount` of `from` into `to`. Yields `0.0` for unknown rates.
    pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> f64 {
        amount * self.conversion_rate(from, to)
    }

    /// Solves for the `from` amount that converts into `amount` of `to`.
    ///
    /// `None` when the rate is unknown, never `inf` or `NaN`.
    pub fn convert_inverse(
        &self,
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Option<f64> {
        let rate = self.conversion_rate(from, to);
        if rate == 0.0 || !rate.is_finite() {
            return None;
        }
        Some(amount / rate)
    }
}
