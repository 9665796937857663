//! HTTP client abstraction used by the health checker.

use super::error::{ProbeError, TransportError};
use super::options::RequestOptions;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::borrow::Cow;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Performs the single GET request of a probe.
///
/// Implementations must return any received response as `Ok`, whatever its
/// status code, and reserve `Err` for failures before a response arrived.
///
/// # Object Safety
///
/// The trait is object-safe and used as `Arc<dyn HttpClient>`.
#[async_trait]
pub trait HttpClient: Send + Sync + 'static {
    /// Issue a GET request to `url` honouring `options`.
    async fn get(&self, url: &str, options: &RequestOptions)
        -> Result<HttpResponse, TransportError>;
}

/// [`HttpClient`] backed by `reqwest`.
///
/// Connect timeout, read timeout, proxy and user agent are fixed when the
/// client is built; the overall timeout and headers are applied per request.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client configured from `options`.
    pub fn from_options(options: &RequestOptions) -> Result<Self, ProbeError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = options.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = options.read_timeout() {
            builder = builder.read_timeout(timeout);
        }
        if let Some(proxy) = options.proxy() {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| {
                ProbeError::InvalidInput(format!("invalid proxy '{}': {}", proxy, e))
            })?;
            builder = builder.proxy(proxy);
        }
        if let Some(user_agent) = options.user_agent() {
            builder = builder.user_agent(user_agent);
        }

        header_map(options).map_err(ProbeError::InvalidInput)?;

        let client = builder
            .build()
            .map_err(|e| ProbeError::InvalidInput(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self
            .client
            .get(url)
            .headers(header_map(options).map_err(TransportError::Request)?);
        if let Some(timeout) = options.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(classify_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify_error)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn header_map(options: &RequestOptions) -> Result<HeaderMap, String> {
    let mut headers = HeaderMap::new();
    for (name, value) in options.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| format!("invalid header name '{}': {}", name, e))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| format!("invalid value for header '{}': {}", name, e))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Classify a reqwest error into a TransportError.
fn classify_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::ConnectionFailed(e.to_string())
    } else if e.is_body() || e.is_decode() {
        TransportError::Body(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_text_is_lossy() {
        let response = HttpResponse::new(200, vec![b'o', b'k', 0xff]);
        assert_eq!(response.text(), "ok\u{fffd}");
    }

    #[test]
    fn test_from_options_defaults() {
        assert!(ReqwestClient::from_options(&RequestOptions::new()).is_ok());
    }

    #[test]
    fn test_from_options_rejects_bad_header() {
        let options =
            RequestOptions::from_value(json!({"headers": {"bad header": "x"}})).unwrap();
        let result = ReqwestClient::from_options(&options);
        assert!(matches!(result, Err(ProbeError::InvalidInput(_))));
    }

    #[test]
    fn test_from_options_rejects_bad_header_value() {
        let options =
            RequestOptions::from_value(json!({"headers": {"X-Token": "a\nb"}})).unwrap();
        assert!(ReqwestClient::from_options(&options).is_err());
    }

    #[test]
    fn test_header_map_built_from_options() {
        let options = RequestOptions::from_value(json!({
            "headers": {"Accept": "text/plain", "X-Probe": "1"}
        }))
        .unwrap();
        let headers = header_map(&options).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["accept"], "text/plain");
    }
}
