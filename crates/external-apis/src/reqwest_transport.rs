// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `reqwest`-backed implementation of [`HttpTransport`]
//!
//! The transport applies no request timeout: a run waits for the endpoint
//! until it answers, fails, or is superseded by the owning component.

use api_client::{HttpResponse, HttpTransport, RequestHeaders, TransportError};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration for the `reqwest` transport
#[derive(Debug, Clone)]
pub struct ReqwestTransportConfig {
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ReqwestTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("nft-data-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Errors specific to the `reqwest` transport
#[derive(Debug, Error)]
pub enum ReqwestTransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ReqwestTransportError> for TransportError {
    fn from(value: ReqwestTransportError) -> Self {
        TransportError::new(value.to_string())
    }
}

/// HTTP transport built on a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent is empty or the HTTP client cannot be created
    pub fn new(config: ReqwestTransportConfig) -> Result<Self, ReqwestTransportError> {
        if config.user_agent.trim().is_empty() {
            return Err(ReqwestTransportError::Config(
                "User agent cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(ReqwestTransportError::Http)?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &RequestHeaders,
    ) -> Result<HttpResponse, TransportError> {
        debug!(url, source = headers.source(), "sending GET request");

        let request = headers
            .iter()
            .fold(self.client.get(url), |request, (name, value)| {
                request.header(name, value)
            });

        let response = request.send().await.map_err(|e| {
            warn!(url, error = %e, "request failed before a response was received");
            ReqwestTransportError::Http(e)
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(ReqwestTransportError::Http)?;

        debug!(url, status, bytes = body.len(), "response received");
        Ok(HttpResponse::new(status, body.to_vec()))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
