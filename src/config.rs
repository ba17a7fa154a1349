//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 5000;
pub const DEFAULT_SNAPSHOT_TIMEOUT_SECS: u64 = 10;

pub const SNAPSHOT_PATH: &str = "/robots";
pub const UPDATES_PATH: &str = "/updates";

/// Errors produced while deriving endpoint addresses.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL does not start with `http://` or `https://`.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server address without trailing slash, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Fixed pause between a closed/failed push connection and the next attempt.
    pub reconnect_delay: Duration,
    pub snapshot_timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
            snapshot_timeout: Duration::from_secs(DEFAULT_SNAPSHOT_TIMEOUT_SECS),
        }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `FLEET_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `FLEET_SNAPSHOT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("FLEET_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let mut config = Self::new(&base_url);
        config.snapshot_timeout =
            Duration::from_secs(env_parse("FLEET_SNAPSHOT_TIMEOUT_SECS", DEFAULT_SNAPSHOT_TIMEOUT_SECS));
        config
    }

    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    #[must_use]
    pub fn with_snapshot_timeout(mut self, timeout: Duration) -> Self {
        self.snapshot_timeout = timeout;
        self
    }

    #[must_use]
    pub fn snapshot_url(&self) -> String {
        format!("{}{SNAPSHOT_PATH}", self.base_url)
    }

    /// Push endpoint address, with the HTTP scheme swapped for its WebSocket twin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for any scheme other than
    /// `http` or `https`.
    pub fn updates_url(&self) -> Result<String, ConfigError> {
        if let Some(rest) = self.base_url.strip_prefix("http://") {
            return Ok(format!("ws://{rest}{UPDATES_PATH}"));
        }
        if let Some(rest) = self.base_url.strip_prefix("https://") {
            return Ok(format!("wss://{rest}{UPDATES_PATH}"));
        }

        Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
