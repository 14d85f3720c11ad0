//! Runtime configuration for building fetchers.
//!
//! Values come from the environment with sensible defaults; nothing here is
//! part of the fetch contract itself.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::fetcher::{parse_base_url, DEFAULT_USER_AGENT};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive whole number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("FETCH_BASE_URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Read `FETCH_BASE_URL`, `FETCH_USER_AGENT` and `FETCH_TIMEOUT_MS`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but with an injectable lookup, for tests.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("FETCH_BASE_URL") {
            if base_url.trim().is_empty() {
                return Err(ConfigError::Empty("FETCH_BASE_URL"));
            }
            parse_base_url(&base_url).map_err(|e| ConfigError::InvalidBaseUrl(e.reason))?;
            config.base_url = base_url;
        }
        if let Some(user_agent) = lookup("FETCH_USER_AGENT") {
            if user_agent.trim().is_empty() {
                return Err(ConfigError::Empty("FETCH_USER_AGENT"));
            }
            config.user_agent = user_agent;
        }
        if let Some(raw) = lookup("FETCH_TIMEOUT_MS") {
            let invalid = || ConfigError::InvalidTimeout {
                var: "FETCH_TIMEOUT_MS",
                value: raw.clone(),
            };
            let millis: u64 = raw.trim().parse().map_err(|_| invalid())?;
            if millis == 0 {
                return Err(invalid());
            }
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "https://api.github.com");
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("FETCH_BASE_URL", "http://127.0.0.1:3000"),
            ("FETCH_USER_AGENT", "demo/1.0"),
            ("FETCH_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.user_agent, "demo/1.0");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("FETCH_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("FETCH_TIMEOUT_MS", "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout {
                var: "FETCH_TIMEOUT_MS",
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let lookup = lookup_from(&[("FETCH_BASE_URL", "ftp://example.com")]);
        let err = Config::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn blank_base_url_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("FETCH_BASE_URL", " ")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty("FETCH_BASE_URL"));
    }
}
