//! Converter Application Context
//!
//! Owns the current [`RateSnapshot`] and the refresh guard. Each instance is
//! independent, so tests build as many as they like without shared state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use chrono::TimeZone;

use conversor_types::{
    AmountFields, Clock, ConversionDirection, ConversionTable, CurrencyCode, CurrencyPair,
    ExchangeRateLine, JsonFetcher, PopularRate, RateSnapshot, RefreshError, RefreshOutcome,
    SnapshotSource,
};
use exchange_rates::{format_amount, parse_amount};

use crate::service::RateService;
use crate::widgets;

/// Application context for the converter.
pub struct ConverterApp<F: JsonFetcher, C: Clock> {
    service: RateService<F, C>,
    snapshot: RwLock<Option<RateSnapshot>>,
    refreshing: AtomicBool,
}

/// Clears the refresh flag on every exit path.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<F: JsonFetcher, C: Clock> ConverterApp<F, C> {
    /// Creates a context with no rates loaded yet.
    pub fn new(service: RateService<F, C>) -> Self {
        Self {
            service,
            snapshot: RwLock::new(None),
            refreshing: AtomicBool::new(false),
        }
    }

    pub fn service(&self) -> &RateService<F, C> {
        &self.service
    }

    /// Returns a copy of the current snapshot, if any.
    pub fn snapshot(&self) -> Option<RateSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_rates(&self) -> bool {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    fn replace(&self, snapshot: RateSnapshot) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Lifecycle
    // ─────────────────────────────────────────────────────────────────────────────

    /// Acquires fresh rates and swaps them in.
    ///
    /// When every provider fails the previous snapshot is kept; if there was
    /// none, the offline table is installed. Only one refresh runs at a time.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Refresh requested while another is running, ignoring");
            return Err(RefreshError::InProgress);
        }
        let _guard = RefreshGuard(&self.refreshing);

        match self.service.acquire_rates().await {
            Ok(snapshot) => {
                let usd_rate = snapshot.rate(CurrencyCode::USD).unwrap_or_default();
                let provider = match snapshot.source() {
                    SnapshotSource::Provider { name } => name.clone(),
                    SnapshotSource::Fallback => "fallback".to_string(),
                };
                self.replace(snapshot);
                Ok(RefreshOutcome::Updated { provider, usd_rate })
            }
            Err(err) => {
                let reason = err.to_string();
                if self.has_rates() {
                    tracing::warn!("Keeping previous rates: {}", reason);
                    Ok(RefreshOutcome::Stale { reason })
                } else {
                    tracing::warn!("Using offline rates: {}", reason);
                    self.use_fallback_rates();
                    Ok(RefreshOutcome::Offline { reason })
                }
            }
        }
    }

    /// Installs the static offline table and returns it.
    pub fn use_fallback_rates(&self) -> RateSnapshot {
        let snapshot = RateSnapshot::fallback(self.service.clock().now());
        self.replace(snapshot.clone());
        snapshot
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Conversion ratio for `pair`; `0.0` when unknown or nothing is loaded.
    pub fn conversion_rate(&self, pair: CurrencyPair) -> f64 {
        self.with_snapshot(|s| s.conversion_rate(pair.from, pair.to))
            .unwrap_or_default()
    }

    /// Recomputes the opposite amount field after `text` was typed.
    ///
    /// Empty when the typed amount is not positive or the rate is unknown.
    pub fn convert_field(
        &self,
        direction: ConversionDirection,
        text: &str,
        pair: CurrencyPair,
    ) -> String {
        let amount = parse_amount(text);
        if amount <= 0.0 {
            return String::new();
        }

        let converted = self.with_snapshot(|s| match direction {
            ConversionDirection::Forward => s
                .checked_conversion_rate(pair.from, pair.to)
                .ok()
                .map(|_| s.convert(amount, pair.from, pair.to)),
            ConversionDirection::Inverse => s.convert_inverse(amount, pair.from, pair.to),
        });

        match converted.flatten() {
            Some(value) => format_amount(value, 2),
            None => String::new(),
        }
    }

    /// Swaps the selected currencies and field contents, then recomputes the
    /// target from the new source amount.
    pub fn swap(&self, pair: CurrencyPair, fields: &AmountFields) -> (CurrencyPair, AmountFields) {
        let pair = pair.swapped();
        let from_amount = fields.to_amount.clone();
        let to_amount = self.convert_field(ConversionDirection::Forward, &from_amount, pair);
        (
            pair,
            AmountFields {
                from_amount,
                to_amount,
            },
        )
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Widgets
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn exchange_rate_line(&self, pair: CurrencyPair) -> Option<ExchangeRateLine> {
        self.with_snapshot(|s| widgets::exchange_rate_line(s, pair))
    }

    pub fn conversion_table(&self, pair: CurrencyPair) -> Option<ConversionTable> {
        self.with_snapshot(|s| widgets::conversion_table(s, pair))
    }

    pub fn popular_rates(&self) -> Vec<PopularRate> {
        self.with_snapshot(widgets::popular_rates)
            .unwrap_or_default()
    }

    pub fn last_update_label<Tz>(&self, tz: &Tz) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.with_snapshot(|s| widgets::last_update_label(s, tz))
    }

    fn with_snapshot<T>(&self, f: impl FnOnce(&RateSnapshot) -> T) -> Option<T> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
    }
}
