//! # Conversor Types
//!
//! Port traits, error types and view models for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! - `ports/` - Trait definitions that adapters must implement (HTTP, clock)
//! - `dto` - View models handed to whatever renders the widgets
//! - `error` - Provider, acquisition and refresh error types

pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use dto::*;
pub use error::{AcquireError, FetchError, ProviderError, RefreshError};
pub use exchange_rates::{CurrencyCode, RateSnapshot, SnapshotSource};
pub use ports::{Clock, JsonFetcher};
