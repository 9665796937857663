//! Transport options passed through to the HTTP client.

use super::error::ProbeError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Default for each timeout option, in seconds.
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Option key: TCP connect timeout in seconds.
pub const CONNECT_TIMEOUT: &str = "connect_timeout";
/// Option key: timeout between reads of the response, in seconds.
pub const READ_TIMEOUT: &str = "read_timeout";
/// Option key: overall request timeout in seconds.
pub const TIMEOUT: &str = "timeout";
/// Timeout keys that always receive a value.
pub const TIMEOUT_KEYS: [&str; 3] = [CONNECT_TIMEOUT, READ_TIMEOUT, TIMEOUT];

/// Option key: extra request headers, a mapping of name to value.
pub const HEADERS: &str = "headers";
/// Option key: proxy URL for all schemes.
pub const PROXY: &str = "proxy";
/// Option key: `User-Agent` header value.
pub const USER_AGENT: &str = "user_agent";

/// Finalised request options.
///
/// The map is opaque to the checker; only the timeout keys are defaulted.
/// `connect_timeout`, `read_timeout` and `timeout` are always present, holding
/// the caller's value or [`DEFAULT_TIMEOUT`]. A timeout of `0` disables it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestOptions(Map<String, Value>);

impl Default for RequestOptions {
    fn default() -> Self {
        let mut map = Map::new();
        apply_default_timeouts(&mut map);
        Self(map)
    }
}

impl RequestOptions {
    /// Options with only the default timeouts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a loosely typed mapping; `null` means no options.
    pub fn from_value(value: Value) -> Result<Self, ProbeError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Self::from_map(map),
            _ => Err(ProbeError::InvalidInput(
                "options must be a mapping of option names to values".to_string(),
            )),
        }
    }

    /// Merge caller options with the default timeouts.
    pub fn from_map(mut map: Map<String, Value>) -> Result<Self, ProbeError> {
        apply_default_timeouts(&mut map);

        for key in TIMEOUT_KEYS {
            if let Some(value) = map.get(key) {
                if seconds(value).is_none() {
                    return Err(ProbeError::InvalidInput(format!(
                        "{} must be a non-negative number of seconds, got {}",
                        key, value
                    )));
                }
            }
        }

        if let Some(headers) = map.get(HEADERS) {
            let valid = headers
                .as_object()
                .is_some_and(|h| h.values().all(Value::is_string));
            if !valid {
                return Err(ProbeError::InvalidInput(format!(
                    "{} must be a mapping of header names to string values",
                    HEADERS
                )));
            }
        }

        for key in [PROXY, USER_AGENT] {
            if map.get(key).is_some_and(|v| !v.is_string()) {
                return Err(ProbeError::InvalidInput(format!("{} must be a string", key)));
            }
        }

        Ok(Self(map))
    }

    /// Set a single option, keeping the timeout guarantees.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self, ProbeError> {
        let mut map = self.0;
        map.insert(key.into(), value.into());
        Self::from_map(map)
    }

    /// Raw option value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The full option map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Connect timeout, `None` when disabled.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.duration(CONNECT_TIMEOUT)
    }

    /// Read timeout, `None` when disabled.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.duration(READ_TIMEOUT)
    }

    /// Overall request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        self.duration(TIMEOUT)
    }

    /// Extra request headers as `(name, value)` pairs.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .get(HEADERS)
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|h| h.iter())
            .filter_map(|(name, value)| value.as_str().map(|v| (name.as_str(), v)))
    }

    pub fn proxy(&self) -> Option<&str> {
        self.0.get(PROXY).and_then(Value::as_str)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.0.get(USER_AGENT).and_then(Value::as_str)
    }

    fn duration(&self, key: &str) -> Option<Duration> {
        self.0
            .get(key)
            .and_then(seconds)
            .filter(|s| *s > 0.0)
            .map(Duration::from_secs_f64)
    }
}

fn apply_default_timeouts(map: &mut Map<String, Value>) {
    for key in TIMEOUT_KEYS {
        map.entry(key).or_insert(Value::from(DEFAULT_TIMEOUT));
    }
}

/// Seconds from a number or numeric string; rejects negative and non-finite values.
fn seconds(value: &Value) -> Option<f64> {
    let secs = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied_to_empty_options() {
        let options = RequestOptions::new();
        for key in TIMEOUT_KEYS {
            assert_eq!(options.get(key), Some(&json!(DEFAULT_TIMEOUT)));
        }
        assert_eq!(options.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(options.as_map().len(), 3);
    }

    #[test]
    fn test_caller_timeout_wins() {
        let options = RequestOptions::from_value(json!({"timeout": 3, "read_timeout": 0.5})).unwrap();
        assert_eq!(options.get(TIMEOUT), Some(&json!(3)));
        assert_eq!(options.get(READ_TIMEOUT), Some(&json!(0.5)));
        assert_eq!(options.get(CONNECT_TIMEOUT), Some(&json!(10)));
        assert_eq!(options.read_timeout(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_other_options_passed_through_untouched() {
        let options = RequestOptions::from_value(json!({
            "headers": {"Accept": "text/plain"},
            "proxy": "http://proxy.local:3128",
            "verify": false
        }))
        .unwrap();

        assert_eq!(options.get("verify"), Some(&json!(false)));
        assert_eq!(options.proxy(), Some("http://proxy.local:3128"));
        assert_eq!(
            options.headers().collect::<Vec<_>>(),
            vec![("Accept", "text/plain")]
        );
        assert_eq!(options.as_map().len(), 6);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let options = RequestOptions::from_value(json!({"timeout": 0})).unwrap();
        assert_eq!(options.get(TIMEOUT), Some(&json!(0)));
        assert_eq!(options.timeout(), None);
    }

    #[test]
    fn test_numeric_string_timeout_accepted() {
        let options = RequestOptions::from_value(json!({"connect_timeout": "2"})).unwrap();
        assert_eq!(options.connect_timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        assert!(RequestOptions::from_value(json!({"timeout": -1})).is_err());
        assert!(RequestOptions::from_value(json!({"timeout": "soon"})).is_err());
        assert!(RequestOptions::from_value(json!({"read_timeout": null})).is_err());
    }

    #[test]
    fn test_invalid_shapes_rejected() {
        assert!(RequestOptions::from_value(json!([1, 2])).is_err());
        assert!(RequestOptions::from_value(json!({"headers": ["Accept"]})).is_err());
        assert!(RequestOptions::from_value(json!({"headers": {"X-Retry": 3}})).is_err());
        assert!(RequestOptions::from_value(json!({"proxy": 8080})).is_err());
    }

    #[test]
    fn test_with_sets_single_option() {
        let options = RequestOptions::new().with(TIMEOUT, 2).unwrap();
        assert_eq!(options.timeout(), Some(Duration::from_secs(2)));
        assert!(RequestOptions::new().with(TIMEOUT, "never").is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every timeout key ends up set, to the caller's value when given.
            #[test]
            fn prop_timeouts_always_present(
                connect in proptest::option::of(0u32..600),
                read in proptest::option::of(0u32..600),
                overall in proptest::option::of(0u32..600),
            ) {
                let mut map = Map::new();
                for (key, value) in [(CONNECT_TIMEOUT, connect), (READ_TIMEOUT, read), (TIMEOUT, overall)] {
                    if let Some(v) = value {
                        map.insert(key.to_string(), json!(v));
                    }
                }

                let options = RequestOptions::from_map(map).unwrap();

                for (key, value) in [(CONNECT_TIMEOUT, connect), (READ_TIMEOUT, read), (TIMEOUT, overall)] {
                    let expected = value.map(u64::from).unwrap_or(DEFAULT_TIMEOUT);
                    prop_assert_eq!(options.get(key), Some(&json!(expected)));
                }
            }
        }
    }
}
