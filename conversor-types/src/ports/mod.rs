//! Port traits (interfaces for adapters).
//!
//! The acquisition service depends on these traits, not on a concrete HTTP
//! client or the system clock, so tests can inject fakes.

mod clock;
mod fetcher;

pub use clock::Clock;
pub use fetcher::JsonFetcher;
