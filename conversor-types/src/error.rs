//! Error types for the currency converter.

/// Failures reported by a [`JsonFetcher`](crate::JsonFetcher) adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
}

/// Provider-level errors. Never fatal: the next provider is tried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} unavailable: {message}")]
    Unavailable { provider: String, message: String },

    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse { provider: String, message: String },

    #[error("{provider} returned no usable USD rate")]
    MissingUsdRate { provider: String },
}

impl ProviderError {
    /// Classifies a fetch failure for `provider`.
    pub fn from_fetch(provider: &str, err: FetchError) -> Self {
        let provider = provider.to_string();
        match err {
            FetchError::InvalidJson(message) => {
                ProviderError::MalformedResponse { provider, message }
            }
            other => ProviderError::Unavailable {
                provider,
                message: other.to_string(),
            },
        }
    }

    pub fn malformed(provider: &str, message: impl Into<String>) -> Self {
        ProviderError::MalformedResponse {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            ProviderError::Unavailable { provider, .. }
            | ProviderError::MalformedResponse { provider, .. }
            | ProviderError::MissingUsdRate { provider } => provider,
        }
    }
}

/// Acquisition-level errors (surfaced to the caller).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    /// Every configured provider failed; the caller falls back to the static table.
    #[error("All rate providers failed ({} attempted)", .failures.len())]
    AllProvidersFailed { failures: Vec<ProviderError> },
}

/// Errors from the application context's refresh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("A rate refresh is already in progress")]
    InProgress,
}
