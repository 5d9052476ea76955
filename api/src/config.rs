//! Client configuration
//!
//! ```
//! use petshop_api::ApiConfig;
//! use std::time::Duration;
//!
//! let config = ApiConfig::default()
//!     .with_base_url("https://zoo.example/api")
//!     .with_timeout(Duration::from_secs(5));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.base_url(), "https://zoo.example/api/");
//! ```

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the API base URL
pub const API_URL_VAR: &str = "PETSHOP_API_URL";

/// Environment variable holding the request timeout in seconds
pub const API_TIMEOUT_VAR: &str = "PETSHOP_API_TIMEOUT_SECS";

/// Base URL used when none is configured (the backend's local dev server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// Failed to parse a configuration value
    #[error("Failed to parse {var}: {message}")]
    ParseError {
        /// Variable that failed to parse
        var: String,
        /// Parser message
        message: String,
    },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Catalog API client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    /// Per-request timeout (connect + response)
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from `PETSHOP_API_URL` and `PETSHOP_API_TIMEOUT_SECS`
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or the result is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or the result is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            config = config.with_base_url(url);
        }

        if let Some(raw) = lookup(API_TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::ParseError {
                var: API_TIMEOUT_VAR.to_string(),
                message: e.to_string(),
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the base URL; a trailing `/` is added if missing
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into().trim().to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL, always ending in `/`
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not http(s) or the timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}
