//! Response conditions evaluated by the health checker.

use super::client::HttpResponse;
use super::error::ProbeError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Condition key: expected HTTP status code.
pub const STATUS_CODE_EQUALS_TO: &str = "status_code_equals_to";
/// Condition key: expected literal substring of the response body.
pub const BODY_CONTAINS: &str = "body_contains";
/// The closed set of accepted condition keys.
pub const CONDITION_KEYS: [&str; 2] = [STATUS_CODE_EQUALS_TO, BODY_CONTAINS];

/// A single kind of condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    StatusCodeEqualsTo,
    BodyContains,
}

impl Condition {
    /// Configuration key for this condition.
    pub fn key(self) -> &'static str {
        match self {
            Condition::StatusCodeEqualsTo => STATUS_CODE_EQUALS_TO,
            Condition::BodyContains => BODY_CONTAINS,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Validated set of response conditions.
///
/// Expected values are stored verbatim as loosely typed values so that
/// configuration sources without a type system (environment variables,
/// hand-written TOML) behave the same as typed callers. A condition whose
/// expected value is "empty" (`0`, `""`, `"0"`, `null`) is treated as not
/// configured at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code_equals_to: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_contains: Option<Value>,
}

impl Conditions {
    /// Empty condition set: any completed exchange is healthy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the response status to equal `code`.
    pub fn status_code_equals_to(mut self, code: u16) -> Self {
        self.status_code_equals_to = Some(Value::from(code));
        self
    }

    /// Require the response body to contain `needle` as literal text.
    pub fn body_contains(mut self, needle: impl Into<String>) -> Self {
        self.body_contains = Some(Value::String(needle.into()));
        self
    }

    /// Build conditions from a loosely typed mapping.
    ///
    /// `null` means no conditions. Anything other than a mapping, or a mapping
    /// with a key outside [`CONDITION_KEYS`], is rejected.
    pub fn from_value(value: Value) -> Result<Self, ProbeError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Self::from_map(map),
            other => Err(ProbeError::InvalidInput(format!(
                "conditions must be a mapping of condition names to expected values, got {}; accepted conditions are: {}",
                type_name(&other),
                CONDITION_KEYS.join(", ")
            ))),
        }
    }

    /// Build conditions from a mapping of condition names to expected values.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, ProbeError> {
        let mut conditions = Self::default();

        for (key, value) in map {
            match key.as_str() {
                STATUS_CODE_EQUALS_TO => {
                    if !matches!(value, Value::Null | Value::Number(_) | Value::String(_)) {
                        return Err(ProbeError::InvalidInput(format!(
                            "{} expects an integer status code, got {}",
                            STATUS_CODE_EQUALS_TO,
                            type_name(&value)
                        )));
                    }
                    if let Value::String(s) = &value {
                        if is_active(&value) && parse_number(s).is_none() {
                            return Err(ProbeError::InvalidInput(format!(
                                "{} expects an integer status code, got '{}'",
                                STATUS_CODE_EQUALS_TO, s
                            )));
                        }
                    }
                    conditions.status_code_equals_to = Some(value);
                }
                BODY_CONTAINS => {
                    if !matches!(value, Value::Null | Value::Number(_) | Value::String(_)) {
                        return Err(ProbeError::InvalidInput(format!(
                            "{} expects a string, got {}",
                            BODY_CONTAINS,
                            type_name(&value)
                        )));
                    }
                    conditions.body_contains = Some(value);
                }
                unknown => {
                    return Err(ProbeError::InvalidInput(format!(
                        "unknown condition '{}'; accepted conditions are: {}",
                        unknown,
                        CONDITION_KEYS.join(", ")
                    )));
                }
            }
        }

        Ok(conditions)
    }

    /// Expected status code, if that condition is active.
    pub fn expected_status(&self) -> Option<&Value> {
        self.status_code_equals_to.as_ref().filter(|v| is_active(v))
    }

    /// Expected body substring, if that condition is active.
    pub fn expected_body(&self) -> Option<Cow<'_, str>> {
        self.body_contains
            .as_ref()
            .filter(|v| is_active(v))
            .map(|v| match v {
                Value::String(s) => Cow::Borrowed(s.as_str()),
                other => Cow::Owned(other.to_string()),
            })
    }

    /// Returns true if no condition is active.
    pub fn is_empty(&self) -> bool {
        self.expected_status().is_none() && self.expected_body().is_none()
    }

    /// Active conditions that `response` does not satisfy.
    pub fn failures(&self, response: &HttpResponse) -> Vec<Condition> {
        let mut failed = Vec::new();

        if let Some(needle) = self.expected_body() {
            if !response.text().contains(&*needle) {
                failed.push(Condition::BodyContains);
            }
        }

        if let Some(expected) = self.expected_status() {
            if !status_matches(expected, response.status) {
                failed.push(Condition::StatusCodeEqualsTo);
            }
        }

        failed
    }
}

/// Whether an expected value switches its condition on.
///
/// `null`, `false`, zero, `""` and `"0"` count as unset, so a literal
/// expectation of status `0` or of an empty body substring cannot be expressed.
pub fn is_active(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Loose numeric equality between an expected status and the received one.
pub fn status_matches(expected: &Value, actual: u16) -> bool {
    let expected = match expected {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    };
    expected.is_some_and(|e| e == f64::from(actual))
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
