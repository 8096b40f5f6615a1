//! SDK configuration.

use serde_json::{Map, Value};
use std::env;

/// Default gateway base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.shwary.com";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;
/// API version appended to the base URL.
pub const API_VERSION: &str = "v1";

/// Configuration construction errors. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Merchant ID is required")]
    MissingMerchantId,

    #[error("Merchant Key is required")]
    MissingMerchantKey,

    #[error("Timeout must be at least 1 second")]
    InvalidTimeout,
}

/// Validated client configuration.
///
/// Constructed once per client lifetime; every constructor rejects empty
/// credentials and a zero timeout, so an instance is always usable.
#[derive(Debug, Clone)]
pub struct Config {
    merchant_id: String,
    merchant_key: String,
    base_url: String,
    timeout: u64,
    sandbox: bool,
}

impl Config {
    /// Creates a configuration with default base URL and timeout.
    pub fn new(
        merchant_id: impl Into<String>,
        merchant_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_parts(merchant_id, merchant_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, false)
    }

    /// Creates a configuration from explicit fields.
    pub fn from_parts(
        merchant_id: impl Into<String>,
        merchant_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: u64,
        sandbox: bool,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            merchant_id: merchant_id.into(),
            merchant_key: merchant_key.into(),
            base_url: base_url.into(),
            timeout,
            sandbox,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration from a generic key-value mapping.
    ///
    /// Keys: `merchant_id`, `merchant_key`, `base_url`, `timeout`,
    /// `sandbox`. Values of the wrong type fall back to defaults rather
    /// than failing; missing credentials still fail validation.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ConfigError> {
        let merchant_id = map
            .get("merchant_id")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let merchant_key = map
            .get("merchant_key")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let base_url = map
            .get("base_url")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_BASE_URL);
        let timeout = map
            .get("timeout")
            .and_then(coerce_timeout)
            .unwrap_or(DEFAULT_TIMEOUT);
        let sandbox = map
            .get("sandbox")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Self::from_parts(merchant_id, merchant_key, base_url, timeout, sandbox)
    }

    /// Creates a configuration from `SHWARY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let merchant_id = env::var("SHWARY_MERCHANT_ID").unwrap_or_default();
        let merchant_key = env::var("SHWARY_MERCHANT_KEY").unwrap_or_default();
        let base_url =
            env::var("SHWARY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = env::var("SHWARY_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT);
        let sandbox = env::var("SHWARY_SANDBOX")
            .map(|s| parse_bool(&s))
            .unwrap_or(false);

        Self::from_parts(merchant_id, merchant_key, base_url, timeout, sandbox)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.merchant_id.is_empty() {
            return Err(ConfigError::MissingMerchantId);
        }
        if self.merchant_key.is_empty() {
            return Err(ConfigError::MissingMerchantKey);
        }
        if self.timeout < 1 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn merchant_key(&self) -> &str {
        &self.merchant_key
    }

    /// Base URL with any trailing slash stripped.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Request timeout in seconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    /// Versioned API root, e.g. `https://api.shwary.com/api/v1`.
    pub fn api_url(&self) -> String {
        format!("{}/api/{}", self.base_url(), API_VERSION)
    }
}

fn coerce_timeout(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "1" | "true" | "on" | "yes")
}
