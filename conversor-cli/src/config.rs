//! Configuration loading from environment.

use std::env;
use std::time::Duration;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub http_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let timeout_secs: u64 = lookup("CONVERSOR_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| {
                anyhow::anyhow!("CONVERSOR_HTTP_TIMEOUT_SECS must be a whole number of seconds")
            })?;
        if timeout_secs == 0 {
            anyhow::bail!("CONVERSOR_HTTP_TIMEOUT_SECS must be greater than zero");
        }

        let log_format = match lookup("CONVERSOR_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                anyhow::bail!("Unknown CONVERSOR_LOG_FORMAT: {} (expected text or json)", other)
            }
        };

        Ok(Self {
            http_timeout: Duration::from_secs(timeout_secs),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CONVERSOR_HTTP_TIMEOUT_SECS", "3"),
            ("CONVERSOR_LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("CONVERSOR_HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("CONVERSOR_HTTP_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("CONVERSOR_LOG_FORMAT", "xml")]).is_err());
    }
}
