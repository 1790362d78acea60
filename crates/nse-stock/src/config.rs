//! Configuration for the upstream market-data client

use crate::error::{Result, StockError};
use nse_utils::env::{self, EnvError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment variable holding the upstream API key
pub const API_KEY_VAR: &str = "INDIAN_STOCK_API_KEY";
/// Environment variable overriding the upstream base URL
pub const BASE_URL_VAR: &str = "INDIAN_STOCK_BASE_URL";
/// Environment variable for the request timeout in seconds
pub const TIMEOUT_VAR: &str = "INDIAN_STOCK_TIMEOUT_SECS";
/// Environment variable for the request budget per minute
pub const RATE_LIMIT_VAR: &str = "INDIAN_STOCK_RATE_LIMIT";
/// Environment variable for the realtime cache TTL in seconds
pub const CACHE_TTL_VAR: &str = "INDIAN_STOCK_CACHE_TTL_SECS";

/// Default upstream endpoint
pub const DEFAULT_BASE_URL: &str = "https://stock.indianapi.in";

impl From<EnvError> for StockError {
    fn from(err: EnvError) -> Self {
        StockError::Config(err.to_string())
    }
}

/// Configuration for market-data operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Static credential sent as `X-API-KEY`
    #[serde(skip_serializing, default)]
    pub api_key: String,

    /// Upstream base URL
    pub base_url: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Maximum upstream requests per minute
    pub rate_limit_per_minute: u32,

    /// Cache TTL for quotes and trending lists
    pub cache_ttl_realtime: Duration,

    /// Cache TTL for historical price series
    pub cache_ttl_historical: Duration,

    /// Cache TTL for financial statements and shareholding
    pub cache_ttl_fundamental: Duration,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            rate_limit_per_minute: 60,
            cache_ttl_realtime: Duration::from_secs(60),       // 1 minute
            cache_ttl_historical: Duration::from_secs(300),    // 5 minutes
            cache_ttl_fundamental: Duration::from_secs(3600),  // 1 hour
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Fails when the API key is missing or any tuning variable is malformed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            api_key: env::required(API_KEY_VAR)?,
            base_url: env::optional(BASE_URL_VAR).unwrap_or(defaults.base_url),
            request_timeout: Duration::from_secs(env::parse_or(
                TIMEOUT_VAR,
                defaults.request_timeout.as_secs(),
            )?),
            rate_limit_per_minute: env::parse_or(RATE_LIMIT_VAR, defaults.rate_limit_per_minute)?,
            cache_ttl_realtime: Duration::from_secs(env::parse_or(
                CACHE_TTL_VAR,
                defaults.cache_ttl_realtime.as_secs(),
            )?),
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(StockError::Config(format!(
                "{API_KEY_VAR} environment variable is required"
            )));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| StockError::Config(format!("invalid base url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StockError::Config(format!(
                "base url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.rate_limit_per_minute == 0 {
            return Err(StockError::Config(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    cache_ttl_realtime: Option<Duration>,
    cache_ttl_historical: Option<Duration>,
    cache_ttl_fundamental: Option<Duration>,
}

impl StockConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the upstream base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set request budget per minute
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set cache TTL for realtime data
    pub fn cache_ttl_realtime(mut self, duration: Duration) -> Self {
        self.cache_ttl_realtime = Some(duration);
        self
    }

    /// Set cache TTL for historical series
    pub fn cache_ttl_historical(mut self, duration: Duration) -> Self {
        self.cache_ttl_historical = Some(duration);
        self
    }

    /// Set cache TTL for fundamental statistics
    pub fn cache_ttl_fundamental(mut self, duration: Duration) -> Self {
        self.cache_ttl_fundamental = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            api_key: self.api_key.unwrap_or(defaults.api_key),
            base_url: self.base_url.unwrap_or(defaults.base_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            cache_ttl_realtime: self.cache_ttl_realtime.unwrap_or(defaults.cache_ttl_realtime),
            cache_ttl_historical: self
                .cache_ttl_historical
                .unwrap_or(defaults.cache_ttl_historical),
            cache_ttl_fundamental: self
                .cache_ttl_fundamental
                .unwrap_or(defaults.cache_ttl_fundamental),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.rate_limit_per_minute, 60);
        assert_eq!(config.cache_ttl_historical, Duration::from_secs(300));
        // No key by default
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = StockConfig::builder()
            .api_key("secret")
            .base_url("http://localhost:8080")
            .rate_limit_per_minute(10)
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.rate_limit_per_minute, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = StockConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));

        assert!(
            StockConfig::builder()
                .api_key("k")
                .base_url("ftp://example.com")
                .build()
                .is_err()
        );
        assert!(
            StockConfig::builder()
                .api_key("k")
                .base_url("not a url")
                .build()
                .is_err()
        );
        assert!(
            StockConfig::builder()
                .api_key("k")
                .rate_limit_per_minute(0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = StockConfig::builder().api_key("secret").build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
