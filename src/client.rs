//! HTTP client for the stub API
//!
//! Every failure (transport, non-2xx, bad body, timeout) surfaces as a
//! `NetworkError`. Nothing is retried.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const API_PATH: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),
}

impl NetworkError {
    pub fn timeout(after: Duration) -> Self {
        NetworkError::Timeout(after.as_millis() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            http,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, API_PATH)
    }

    /// `GET /api`
    pub async fn greeting(&self) -> Result<Greeting, NetworkError> {
        let url = self.endpoint();
        debug!(%url, "fetching greeting");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "stub api returned non-success status");
            return Err(NetworkError::Status(status.as_u16()));
        }

        response
            .json::<Greeting>()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> NetworkError {
        if e.is_timeout() {
            NetworkError::timeout(self.timeout)
        } else {
            NetworkError::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:5000/", Duration::from_secs(1));
        assert_eq!(client.endpoint(), "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}"), Duration::from_secs(2));
        let err = client.greeting().await.unwrap_err();
        assert!(matches!(err, NetworkError::Request(_) | NetworkError::Timeout(_)));
    }

    #[test]
    fn test_timeout_reports_millis() {
        let err = NetworkError::timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Request timed out after 1500 ms");
    }
}
