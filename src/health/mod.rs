//! Single-shot HTTP health probing.
//!
//! A [`HealthChecker`] issues one GET request to its endpoint with finite
//! timeouts and reduces the configured [`Conditions`] to a healthy/unhealthy
//! verdict. Transport failures never escape evaluation; they make the verdict
//! unhealthy.

mod client;
mod conditions;
mod error;
mod options;


pub use client::*;
pub use conditions::*;
pub use error::*;
pub use options::*;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Probes one HTTP endpoint.
///
/// Configuration is immutable after construction and each evaluation keeps
/// its verdict local, so a checker can be shared across tasks and evaluated
/// any number of times.
pub struct HealthChecker {
    /// Probed URL, stored verbatim
    endpoint: String,
    /// Validated response conditions
    conditions: Conditions,
    /// Options with finalised timeouts
    options: RequestOptions,
    /// HTTP client collaborator
    client: Arc<dyn HttpClient>,
}

impl HealthChecker {
    /// Create a checker backed by a [`ReqwestClient`] built from `options`.
    pub fn new(
        endpoint: impl Into<String>,
        conditions: Conditions,
        options: RequestOptions,
    ) -> Result<Self, ProbeError> {
        let client = ReqwestClient::from_options(&options)?;
        Ok(Self::with_client(
            endpoint,
            conditions,
            options,
            Arc::new(client),
        ))
    }

    /// Create a checker with a caller-supplied HTTP client.
    pub fn with_client(
        endpoint: impl Into<String>,
        conditions: Conditions,
        options: RequestOptions,
        client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            conditions,
            options,
            client,
        }
    }

    /// Create a checker from loosely typed configuration values.
    ///
    /// The endpoint must be a string; conditions and options must be mappings
    /// or `null`.
    pub fn from_values(
        endpoint: &Value,
        conditions: Value,
        options: Value,
    ) -> Result<Self, ProbeError> {
        let (endpoint, conditions, options) = parse_values(endpoint, conditions, options)?;
        Self::new(endpoint, conditions, options)
    }

    /// Like [`HealthChecker::from_values`] with a caller-supplied HTTP client.
    pub fn from_values_with_client(
        endpoint: &Value,
        conditions: Value,
        options: Value,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, ProbeError> {
        let (endpoint, conditions, options) = parse_values(endpoint, conditions, options)?;
        Ok(Self::with_client(endpoint, conditions, options, client))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Probe the endpoint once and describe what happened.
    pub async fn check(&self) -> ProbeOutcome {
        let start = Instant::now();

        match self.client.get(&self.endpoint, &self.options).await {
            Ok(response) => {
                let latency_ms = start.elapsed().as_millis() as u64;
                let failed = self.conditions.failures(&response);

                tracing::debug!(
                    url = %self.endpoint,
                    status = response.status,
                    latency_ms,
                    failed = ?failed,
                    "Probe response evaluated"
                );

                ProbeOutcome::Responded {
                    status: response.status,
                    latency_ms,
                    failed,
                }
            }
            Err(error) => {
                tracing::warn!(
                    url = %self.endpoint,
                    error = %error,
                    "Probe request failed, reporting unhealthy"
                );
                ProbeOutcome::Unreachable { error }
            }
        }
    }

    /// Probe the endpoint once and return the verdict.
    ///
    /// Healthy unless the request failed or an active condition did not hold.
    pub async fn is_healthy(&self) -> bool {
        self.check().await.is_healthy()
    }

    /// Alias for [`HealthChecker::is_healthy`].
    pub async fn is_alive(&self) -> bool {
        self.is_healthy().await
    }
}

impl fmt::Debug for HealthChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthChecker")
            .field("endpoint", &self.endpoint)
            .field("conditions", &self.conditions)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// A response arrived; `failed` lists the active conditions it broke
    Responded {
        status: u16,
        latency_ms: u64,
        failed: Vec<Condition>,
    },
    /// The request failed before a response arrived
    Unreachable { error: TransportError },
}

impl ProbeOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Responded { failed, .. } if failed.is_empty())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Responded { status, .. } => Some(*status),
            ProbeOutcome::Unreachable { .. } => None,
        }
    }
}

fn parse_values(
    endpoint: &Value,
    conditions: Value,
    options: Value,
) -> Result<(String, Conditions, RequestOptions), ProbeError> {
    let endpoint = endpoint
        .as_str()
        .ok_or_else(|| {
            ProbeError::InvalidInput(format!("endpoint URL must be a string, got {}", endpoint))
        })?
        .to_string();

    Ok((
        endpoint,
        Conditions::from_value(conditions)?,
        RequestOptions::from_value(options)?,
    ))
}
