//! Storefront configuration
//!
//! Aggregates the API client and store settings. Everything can be
//! overridden from the environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `PETSHOP_API_URL` | API base URL | `http://localhost:8000/api/` |
//! | `PETSHOP_API_TIMEOUT_SECS` | per-request timeout | `10` |
//! | `PETSHOP_SHUTDOWN_TIMEOUT_SECS` | store teardown timeout | `30` |

use petshop_api::{ApiConfig, ConfigError};
use petshop_runtime::StoreConfig;
use std::time::Duration;

/// Environment variable holding the store shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_VAR: &str = "PETSHOP_SHUTDOWN_TIMEOUT_SECS";

/// Storefront configuration
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfig {
    /// API client configuration
    pub api: ApiConfig,
    /// Store runtime configuration
    pub store: StoreConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment variables
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
        let api = ApiConfig::from_lookup(&lookup)?;
        let mut store = StoreConfig::default();

        if let Some(raw) = lookup(SHUTDOWN_TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::ParseError {
                var: SHUTDOWN_TIMEOUT_VAR.to_string(),
                message: e.to_string(),
            })?;
            store = store.with_shutdown_timeout(Duration::from_secs(secs));
        }

        Ok(Self { api, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_variables() {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.store.default_shutdown_timeout, Duration::from_secs(30));
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_shutdown_override() {
        let config = StorefrontConfig::from_lookup(|var| {
            (var == SHUTDOWN_TIMEOUT_VAR).then(|| "2".to_string())
        })
        .unwrap();
        assert_eq!(config.store.default_shutdown_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_bad_shutdown_value() {
        let result = StorefrontConfig::from_lookup(|var| {
            (var == SHUTDOWN_TIMEOUT_VAR).then(|| "later".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
