//! HTTP transport abstraction
//!
//! The client builds and signs requests; a [`Transport`] only moves them over
//! the wire. [`ReqwestTransport`] is the default implementation. Custom
//! transports can add proxies, retries or recording without touching the
//! signing code.

use crate::types::{ClientConfig, HttpMethod};
use crate::{CryptomusError, Result};
use async_trait::async_trait;

/// A fully built, signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Query parameters, in body order
    pub query: Vec<(String, String)>,
    /// JSON payload for body-carrying methods
    pub payload: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl TransportRequest {
    /// Look up a header value, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response from the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for sending signed requests
///
/// Implementations return `Ok` whenever a response was received, whatever its
/// status, and [`CryptomusError::Transport`] when none was.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = &config.user_agent {
            client_builder = client_builder.user_agent(user_agent.clone());
        }

        let client = client_builder
            .build()
            .map_err(|e| CryptomusError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(payload) = request.payload {
            builder = builder.body(payload);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CryptomusError::transport(e.to_string()))?;
        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            CryptomusError::transport(format!("Failed to read response body: {}", e))
        })?;

        Ok(TransportResponse { status, body })
    }
}
