//! Clock port.

use chrono::{DateTime, Utc};

/// Source of the current instant, used when a provider omits its quote time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
