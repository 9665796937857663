//! Probe target configuration

use crate::health::{Conditions, HealthChecker, ProbeError, RequestOptions};
use serde::{Deserialize, Serialize};

/// Endpoint to probe and how to judge it.
///
/// Conditions and options are kept as raw tables so that unknown condition
/// keys are reported by the checker rather than swallowed by serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub url: String,
    pub conditions: toml::Table,
    pub options: toml::Table,
}

impl TargetConfig {
    /// Validated conditions from the `conditions` table.
    pub fn conditions(&self) -> Result<Conditions, ProbeError> {
        Conditions::from_value(to_json(&self.conditions)?)
    }

    /// Options from the `options` table, merged with the default timeouts.
    pub fn options(&self) -> Result<RequestOptions, ProbeError> {
        RequestOptions::from_value(to_json(&self.options)?)
    }

    /// Build a checker for this target.
    pub fn build_checker(&self) -> Result<HealthChecker, ProbeError> {
        HealthChecker::new(self.url.clone(), self.conditions()?, self.options()?)
    }
}

fn to_json(table: &toml::Table) -> Result<serde_json::Value, ProbeError> {
    serde_json::to_value(table).map_err(|e| ProbeError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_config_defaults() {
        let config = TargetConfig::default();
        assert!(config.url.is_empty());
        assert!(config.conditions.is_empty());
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_target_config_toml() {
        let toml = r#"
            url = "http://localhost:8080/health"

            [conditions]
            status_code_equals_to = 200
            body_contains = "UP"

            [options]
            timeout = 2.5

            [options.headers]
            Accept = "application/json"
        "#;
        let config: TargetConfig = toml::from_str(toml).unwrap();

        let conditions = config.conditions().unwrap();
        assert_eq!(conditions.expected_status(), Some(&json!(200)));
        assert_eq!(conditions.expected_body().as_deref(), Some("UP"));

        let options = config.options().unwrap();
        assert_eq!(options.get("timeout"), Some(&json!(2.5)));
        assert_eq!(options.get("read_timeout"), Some(&json!(10)));
        assert_eq!(
            options.headers().collect::<Vec<_>>(),
            vec![("Accept", "application/json")]
        );

        assert!(config.build_checker().is_ok());
    }

    #[test]
    fn test_target_config_unknown_condition() {
        let toml = r#"
            url = "http://localhost"

            [conditions]
            status = 200
        "#;
        let config: TargetConfig = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.build_checker(),
            Err(ProbeError::InvalidInput(_))
        ));
    }
}
