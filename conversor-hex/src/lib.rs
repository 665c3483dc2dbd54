//! # Conversor Hex
//!
//! Application layer of the currency converter.
//!
//! ## Architecture
//!
//! - `providers/` - One normalizer per upstream response shape
//! - `service/` - Rate acquisition over the prioritized provider chain
//! - `app/` - Owned converter context (current snapshot, refresh guard)
//! - `widgets/` - View-model builders for the rate line, table and panels
//!
//! The service is generic over `F: JsonFetcher` and `C: Clock`, so the HTTP
//! adapter and the time source are injected.

pub mod app;
pub mod providers;
pub mod service;
pub mod widgets;


pub use app::ConverterApp;
pub use providers::{PairQuoteProvider, RateProvider, UsdTableProvider, default_providers};
pub use service::RateService;
