//! JSON-over-HTTP client shared by the forecast and geocoding clients.
//!
//! Each client is built from an explicit [`HttpClientConfig`] (base URL,
//! timeout, default headers), so tests can point it at a mock server without
//! touching process-wide state. Calls are not retried; a failed call surfaces
//! immediately to the caller.

use crate::services::metrics::ClientMetrics;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use url::Url;

/// Connection settings for one upstream service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpClientConfig {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// Upper bound for a whole request, connect through body (in milliseconds)
    pub timeout_ms: u64,

    /// Headers sent with every request
    pub headers: Vec<(String, String)>,

    /// Log every completed request at info level
    pub enable_detailed_logging: bool,
}

impl HttpClientConfig {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
            headers: Vec::new(),
            enable_detailed_logging: true,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Errors raised by [`ApiClient`]
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Upstream returned status {status}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header '{0}'")]
    InvalidHeader(String),
}

impl ClientError {
    /// Short label used for metrics and logs
    pub fn outcome(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "network_error",
            ClientError::Timeout(_) => "timeout",
            ClientError::Status { .. } => "http_status",
            ClientError::Decode(_) => "decode_error",
            ClientError::InvalidUrl(_) | ClientError::InvalidHeader(_) => "invalid_request",
        }
    }

    /// Connection refused, DNS failure, timeout and similar transport failures
    pub fn is_connection_failure(&self) -> bool {
        match self {
            ClientError::Timeout(_) => true,
            ClientError::Network(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

/// HTTP client bound to one upstream base URL
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: HttpClientConfig,
    destination: String,
    metrics: Option<ClientMetrics>,
}

impl ApiClient {
    pub fn new(config: HttpClientConfig, metrics: Option<ClientMetrics>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let base = Url::parse(&config.base_url)?;
        let destination = base.host_str().unwrap_or("unknown").to_string();

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            config,
            destination,
            metrics,
        })
    }

    /// Host name used to label this client's requests
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Full URL for `path` under the base URL with `query` appended
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let joined = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET `path` and decode a JSON body. Non-success statuses are returned
    /// as [`ClientError::Status`] with the raw body for the caller to inspect.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path, query)?;
        let start = Instant::now();

        let result = self.execute(url.clone()).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                if self.config.enable_detailed_logging {
                    info!(
                        destination = %self.destination,
                        path = %url.path(),
                        duration_ms = duration.as_millis(),
                        "Upstream request completed"
                    );
                }
                self.record(url.path(), "success", duration);
            }
            Err(err) => {
                warn!(
                    destination = %self.destination,
                    path = %url.path(),
                    outcome = err.outcome(),
                    error = %err,
                    duration_ms = duration.as_millis(),
                    "Upstream request failed"
                );
                self.record(url.path(), err.outcome(), duration);
            }
        }

        result
    }

    async fn execute<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let timeout = self.config.timeout();

        let response = match tokio::time::timeout(timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => return Err(ClientError::Timeout(timeout)),
            Ok(Err(e)) => return Err(ClientError::Network(e)),
            Err(_) => return Err(ClientError::Timeout(timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(timeout)
            } else {
                ClientError::Network(e)
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn record(&self, path: &str, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics.record_request(&self.destination, path, outcome, duration);
        }
    }
}
