/*
[INPUT]:  YAML configuration file and POLLING_* environment variables
[OUTPUT]: Parsed exchange configuration
[POS]:    Configuration layer - exchange selection and HTTP settings
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{ClientConfig, MarketDataError, Result};
use crate::market_data::RetryPolicy;
use crate::types::ExchangeId;

pub const ENV_EXCHANGE: &str = "POLLING_EXCHANGE";
pub const ENV_BASE_URL: &str = "POLLING_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "POLLING_TIMEOUT_SECS";

/// Which exchange to poll and how to reach it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExchangeConfig {
    pub exchange: ExchangeId,
    /// Overrides the adapter's default base URL. A path prefix is kept:
    /// `https://proxy/mtgox` routes to `https://proxy/mtgox/api/...`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Wrap the service in a retry decorator when set
    #[serde(default)]
    pub retry: Option<RetryPolicy>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl ExchangeConfig {
    pub fn new(exchange: ExchangeId) -> Self {
        Self {
            exchange,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            retry: None,
        }
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| MarketDataError::Config(format!("invalid config: {e}")))?;
        config.validate()
    }

    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MarketDataError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply `POLLING_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(non_empty_var)
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(exchange) = lookup(ENV_EXCHANGE) {
            self.exchange = exchange.parse()?;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|e| {
                MarketDataError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds: {e}"))
            })?;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.timeout_secs == 0 {
            return Err(MarketDataError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)?;
        }
        if self.retry.is_some_and(|policy| policy.max_attempts == 0) {
            return Err(MarketDataError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: self.request_timeout(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
