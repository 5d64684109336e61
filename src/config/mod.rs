//! Configuration loading and management

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every path is appended to (e.g. "http://localhost:5000/api")
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Orders view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Seconds between two background reloads of the order list
    pub refresh_interval_secs: u64,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5,
        }
    }
}

impl OrdersConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Complete dashboard configuration
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```yaml
/// api:
///   base_url: http://localhost:5000/api
///   timeout_ms: 10000
/// orders:
///   refresh_interval_secs: 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TavolaConfig {
    pub api: ApiConfig,
    pub orders: OrdersConfig,
}

impl TavolaConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::IoError {
                    message: e.to_string(),
                }
            }
        })?;
        Self::parse(&content, Some(path.display().to_string()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<String>) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file,
            message: e.to_string(),
        })
    }

    /// Apply `TAVOLA_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Recognised keys: `TAVOLA_API_URL`, `TAVOLA_TIMEOUT_MS`, `TAVOLA_REFRESH_SECS`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TAVOLA_API_URL") {
            self.api.base_url = url;
        }
        if let Some(raw) = lookup("TAVOLA_TIMEOUT_MS") {
            self.api.timeout_ms = parse_number("api.timeout_ms", &raw)?;
        }
        if let Some(raw) = lookup("TAVOLA_REFRESH_SECS") {
            self.orders.refresh_interval_secs = parse_number("orders.refresh_interval_secs", &raw)?;
        }
        Ok(self)
    }

    /// Check the values that would otherwise fail late
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api.base_url)
            .map_err(|e| invalid("api.base_url", &self.api.base_url, e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "api.base_url",
                &self.api.base_url,
                "scheme must be http or https",
            ));
        }
        if self.api.timeout_ms == 0 {
            return Err(invalid("api.timeout_ms", "0", "must be greater than zero"));
        }
        if self.orders.refresh_interval_secs == 0 {
            return Err(invalid(
                "orders.refresh_interval_secs",
                "0",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn parse_number(field: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(field, raw, "expected a positive integer"))
}

fn invalid(field: &str, value: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = TavolaConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.orders.refresh_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = TavolaConfig::from_yaml_str("api:\n  base_url: http://kitchen:8080/api\n").unwrap();

        assert_eq!(config.api.base_url, "http://kitchen:8080/api");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.orders.refresh_interval_secs, 5);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(TavolaConfig::from_yaml_str("").unwrap(), TavolaConfig::default());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = TavolaConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = TavolaConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("TAVOLA_API_URL", "https://backoffice.example/api"),
            ("TAVOLA_REFRESH_SECS", "15"),
        ]
        .into_iter()
        .collect();

        let config = TavolaConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "https://backoffice.example/api");
        assert_eq!(config.orders.refresh_interval_secs, 15);
        assert_eq!(config.api.timeout_ms, 10_000);
    }

    #[test]
    fn test_bad_override_is_invalid_value() {
        let err = TavolaConfig::default()
            .with_overrides(|key| (key == "TAVOLA_TIMEOUT_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "api.timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = TavolaConfig::default();
        config.orders.refresh_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = TavolaConfig::default();
        config.api.base_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "ftp://localhost/api".to_string();
        assert!(config.validate().is_err());
    }
}
