//! Configuration file parsing for the Router.
//!
//! Loads settings from TOML files including bind address, artifact paths,
//! the decision threshold and validation bounds.

use docket_domain::DEFAULT_THRESHOLD;
use docket_gatekeeper::ValidationConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Router configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is present but unusable
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending key
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Router configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 5000)
    pub bind_port: u16,

    /// SQLite database path for stored predictions
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Model artifact (JSON)
    pub model_path: String,

    /// Race reference counts (JSON)
    pub race_counts_path: String,

    /// Probability-to-label cutoff
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Validation bounds
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_database_path() -> String {
    "predictions.db".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: RouterConfig = toml::from_str(contents)?;
        config.database_path = sqlite_path(&config.database_path)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid {
                field: "threshold".to_string(),
                reason: format!("{} is outside [0, 1]", self.threshold),
            });
        }
        if self.validation.count_min > self.validation.count_max {
            return Err(ConfigError::Invalid {
                field: "validation".to_string(),
                reason: format!(
                    "count_min {} exceeds count_max {}",
                    self.validation.count_min, self.validation.count_max
                ),
            });
        }
        if self.model_path.is_empty() {
            return Err(ConfigError::Invalid {
                field: "model_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Override the database location from a `DATABASE_URL`-style value
    pub fn with_database_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.database_path = sqlite_path(url)?;
        Ok(self)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        RouterConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 5000,
            database_path: ":memory:".to_string(),
            model_path: "models/recidivism.json".to_string(),
            race_counts_path: "models/race_counts.json".to_string(),
            threshold: DEFAULT_THRESHOLD,
            validation: ValidationConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

/// Resolve a database URL to a SQLite path
///
/// Accepts `sqlite:///relative.db`, `sqlite:////absolute.db`,
/// `sqlite://:memory:` and plain paths.
pub fn sqlite_path(url: &str) -> Result<String, ConfigError> {
    if let Some(rest) = url.strip_prefix("sqlite://") {
        let path = rest.strip_prefix('/').unwrap_or(rest);
        if path.is_empty() {
            return Err(ConfigError::Invalid {
                field: "database_url".to_string(),
                reason: "missing database path".to_string(),
            });
        }
        return Ok(path.to_string());
    }
    if url.contains("://") {
        return Err(ConfigError::Invalid {
            field: "database_url".to_string(),
            reason: format!("unsupported scheme in '{}'", url),
        });
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 5000);
        assert_eq!(config.threshold, 0.6);
        assert_eq!(config.database_path, ":memory:");
    }

    #[test]
    fn test_bind_addr() {
        let config = RouterConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            database_path = "/var/lib/docket/predictions.db"
            model_path = "models/recidivism.json"
            race_counts_path = "models/race_counts.json"

            [validation]
            count_max = 40
        "#;

        let config = RouterConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.database_path, "/var/lib/docket/predictions.db");
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.validation.count_max, 40.0);
        assert_eq!(config.validation.count_min, 0.0);
        assert!(config.validation.check_duplicate_ids);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            model_path = "m.json"
            race_counts_path = "r.json"
            threshold = 1.5
        "#;

        assert!(matches!(
            RouterConfig::from_toml_str(toml),
            Err(ConfigError::Invalid { field, .. }) if field == "threshold"
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docket.toml");
        std::fs::write(
            &path,
            "bind_address = \"127.0.0.1\"\nbind_port = 1\nmodel_path = \"m\"\nrace_counts_path = \"r\"\n",
        )
        .unwrap();

        let config = RouterConfig::from_file(&path).unwrap();
        assert_eq!(config.database_path, "predictions.db");
        assert!(matches!(
            RouterConfig::from_file(dir.path().join("missing.toml")),
            Err(ConfigError::FileRead(_))
        ));
    }

    #[test]
    fn test_sqlite_path() {
        assert_eq!(sqlite_path("sqlite:///predictions.db").unwrap(), "predictions.db");
        assert_eq!(sqlite_path("sqlite:////tmp/p.db").unwrap(), "/tmp/p.db");
        assert_eq!(sqlite_path("sqlite://:memory:").unwrap(), ":memory:");
        assert_eq!(sqlite_path("local.db").unwrap(), "local.db");
        assert!(sqlite_path("postgres://localhost/db").is_err());
        assert!(sqlite_path("sqlite:///").is_err());
    }

    #[test]
    fn test_with_database_url() {
        let config = RouterConfig::default_test_config()
            .with_database_url("sqlite:///served.db")
            .unwrap();
        assert_eq!(config.database_path, "served.db");
    }
}
