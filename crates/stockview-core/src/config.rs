//! Provider configuration, read once at startup and injected into the
//! fetcher.

use std::fmt::{Debug, Formatter};

use crate::ValidationError;

pub const API_KEY_ENV: &str = "STOCKVIEW_POLYGON_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

pub const DEFAULT_LATEST_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_RANGE_TIMEOUT_MS: u64 = 30_000;

/// Upper bound on bars per ranged request, fixed by the provider contract.
pub const RANGE_BAR_LIMIT: u32 = 50_000;

#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    api_key: String,
    base_url: String,
    latest_timeout_ms: u64,
    range_timeout_ms: u64,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ValidationError> {
        let api_key = api_key.into().trim().to_owned();
        if api_key.is_empty() {
            return Err(ValidationError::MissingApiKey { name: API_KEY_ENV });
        }

        Ok(Self {
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
            latest_timeout_ms: DEFAULT_LATEST_TIMEOUT_MS,
            range_timeout_ms: DEFAULT_RANGE_TIMEOUT_MS,
        })
    }

    /// Build from `STOCKVIEW_POLYGON_API_KEY`. The key is the only setting
    /// taken from the environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::new(std::env::var(API_KEY_ENV).unwrap_or_default())
    }

    /// Point the fetcher at another host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeouts(
        mut self,
        latest_timeout_ms: u64,
        range_timeout_ms: u64,
    ) -> Result<Self, ValidationError> {
        if latest_timeout_ms == 0 || range_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        self.latest_timeout_ms = latest_timeout_ms;
        self.range_timeout_ms = range_timeout_ms;
        Ok(self)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn latest_timeout_ms(&self) -> u64 {
        self.latest_timeout_ms
    }

    pub const fn range_timeout_ms(&self) -> u64 {
        self.range_timeout_ms
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("latest_timeout_ms", &self.latest_timeout_ms)
            .field("range_timeout_ms", &self.range_timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_api_key() {
        let err = ProviderConfig::new("   ").expect_err("must fail");
        assert_eq!(err, ValidationError::MissingApiKey { name: API_KEY_ENV });
    }

    #[test]
    fn defaults_match_provider_contract() {
        let config = ProviderConfig::new("key").expect("valid");
        assert_eq!(config.base_url(), "https://api.polygon.io");
        assert_eq!(config.latest_timeout_ms(), 20_000);
        assert_eq!(config.range_timeout_ms(), 30_000);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = ProviderConfig::new("key")
            .expect("valid")
            .with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ProviderConfig::new("key")
            .expect("valid")
            .with_timeouts(0, 1_000)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidTimeout);
    }

    #[test]
    fn from_env_reads_only_the_key() {
        std::env::set_var(API_KEY_ENV, "env-key");
        std::env::set_var("STOCKVIEW_POLYGON_BASE_URL", "http://override.test");

        let config = ProviderConfig::from_env().expect("key is set");
        assert_eq!(config.api_key(), "env-key");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);

        std::env::remove_var("STOCKVIEW_POLYGON_BASE_URL");
        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    fn debug_never_prints_the_key() {
        let config = ProviderConfig::new("super-secret").expect("valid");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
