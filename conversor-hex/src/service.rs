//! Rate Acquisition Service
//!
//! Walks the provider chain in priority order and returns the first snapshot
//! with a usable USD rate. Providers are queried strictly one after another;
//! once one succeeds the rest are never contacted.

use conversor_types::{
    AcquireError, Clock, CurrencyCode, JsonFetcher, ProviderError, RateSnapshot,
};

use crate::providers::{RateProvider, default_providers};

/// Application service for rate acquisition.
///
/// Generic over `F: JsonFetcher` and `C: Clock` - the adapters are injected at
/// compile time, so tests run against in-memory fakes.
pub struct RateService<F: JsonFetcher, C: Clock> {
    fetcher: F,
    clock: C,
    providers: Vec<Box<dyn RateProvider>>,
}

impl<F: JsonFetcher, C: Clock> RateService<F, C> {
    /// Creates a service over the default provider chain.
    pub fn new(fetcher: F, clock: C) -> Self {
        Self::with_providers(fetcher, clock, default_providers())
    }

    /// Creates a service over a custom provider chain, tried in the given order.
    pub fn with_providers(fetcher: F, clock: C, providers: Vec<Box<dyn RateProvider>>) -> Self {
        Self {
            fetcher,
            clock,
            providers,
        }
    }

    /// Returns a reference to the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Acquires a fresh snapshot from the first provider that yields a
    /// positive USD rate.
    ///
    /// Provider failures are logged and skipped; only exhausting the whole
    /// chain is reported, with every failure attached.
    pub async fn acquire_rates(&self) -> Result<RateSnapshot, AcquireError> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            tracing::debug!(
                provider = provider.name(),
                endpoint = provider.endpoint(),
                "Requesting exchange rates"
            );

            let failure = match provider.fetch(&self.fetcher, &self.clock).await {
                Ok(snapshot) => match snapshot.rate(CurrencyCode::USD) {
                    Some(usd) => {
                        tracing::info!(
                            "Rates acquired from {} (USD = {:.4} BRL)",
                            provider.name(),
                            usd
                        );
                        return Ok(snapshot);
                    }
                    None => ProviderError::MissingUsdRate {
                        provider: provider.name().to_string(),
                    },
                },
                Err(err) => err,
            };

            tracing::warn!(
                provider = provider.name(),
                error = %failure,
                "Provider failed, trying next"
            );
            failures.push(failure);
        }

        tracing::warn!("All {} rate providers failed", failures.len());
        Err(AcquireError::AllProvidersFailed { failures })
    }
}
