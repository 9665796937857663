//! Error types for health probing.

use thiserror::Error;

/// Errors raised while constructing a [`HealthChecker`](super::HealthChecker).
///
/// Evaluation never returns this type; transport problems are reported as
/// [`TransportError`] inside an unhealthy outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Endpoint, conditions or options were malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Failures signalled by the HTTP client before a response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request timeout
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Connection failed (refused, reset, DNS)
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Request could not be built or sent
    #[error("request failed: {0}")]
    Request(String),
}
