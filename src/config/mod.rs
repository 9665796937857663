//! Configuration module for the probe
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PROBE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use probe::config::ProbeConfig;
//!
//! let toml = r#"
//! [target]
//! url = "http://localhost:8080/health"
//!
//! [target.conditions]
//! status_code_equals_to = 200
//! "#;
//! let config: ProbeConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.target.url, "http://localhost:8080/health");
//! assert!(config.validate().is_ok());
//! ```

pub mod error;
pub mod logging;
pub mod target;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use target::TargetConfig;

use crate::health::{BODY_CONTAINS, STATUS_CODE_EQUALS_TO, TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for a probe run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Endpoint, conditions and transport options
    pub target: TargetConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ProbeConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports PROBE_* environment variables for common settings.
    /// Invalid values are silently ignored (file values are kept).
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply PROBE_* overrides read through `lookup` instead of the process
    /// environment.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PROBE_URL") {
            self.target.url = url;
        }

        // Kept as text; the status comparison accepts numeric strings.
        if let Some(status) = lookup("PROBE_STATUS_CODE_EQUALS_TO") {
            self.target
                .conditions
                .insert(STATUS_CODE_EQUALS_TO.to_string(), toml::Value::String(status));
        }
        if let Some(needle) = lookup("PROBE_BODY_CONTAINS") {
            self.target
                .conditions
                .insert(BODY_CONTAINS.to_string(), toml::Value::String(needle));
        }
        if let Some(t) = lookup("PROBE_TIMEOUT").and_then(|t| t.parse::<f64>().ok()) {
            if t.is_finite() && t >= 0.0 {
                self.target
                    .options
                    .insert(TIMEOUT.to_string(), toml::Value::Float(t));
            }
        }

        if let Some(level) = lookup("PROBE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(f) = lookup("PROBE_LOG_FORMAT").and_then(|f| f.parse().ok()) {
            self.logging.format = f;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.url.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "target.url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }

        self.target.conditions()?;
        self.target.options()?;

        Ok(())
    }
}
