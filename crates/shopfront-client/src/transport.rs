//! # HTTP Transport
//!
//! The seam between the request gateway and the network.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Transport Seam                                  │
//! │                                                                         │
//! │   Gateway ── HttpRequest ──► HttpTransport::send ── HttpResponse ──►   │
//! │                                     │                                   │
//! │                                     ├── ReqwestTransport (production)   │
//! │                                     └── scripted double (tests)         │
//! │                                                                         │
//! │   Ok(HttpResponse)   a status line and the full body arrived           │
//! │   Err(TransportError) nothing usable arrived (DNS, refused, reset)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transport knows nothing about JSON, tokens or error envelopes. It
//! does not time out; a hung backend suspends the caller.

use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, Method};
use thiserror::Error;
use tracing::trace;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Wire Types
// =============================================================================

/// A fully assembled request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A received response with its complete body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport could not produce a response.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

// =============================================================================
// Transport Trait
// =============================================================================

/// Sends one request and waits for its response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =============================================================================
// reqwest Transport
// =============================================================================

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client with rustls and a crate user agent.
    pub fn new() -> ClientResult<Self> {
        let client = ClientBuilder::new()
            .user_agent(format!("shopfront-client/{}", env!("CARGO_PKG_VERSION")))
            .use_rustls_tls()
            .build()
            .map_err(|e| {
                ClientError::InvalidConfig(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(describe(&e)))?;
        let status = response.status().as_u16();

        // A body cut off mid-stream is as good as no response.
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(describe(&e)))?;

        trace!(status, bytes = body.len(), "Response received");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Flattens a reqwest error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// =============================================================================
// Scripted Transport (tests)
// =============================================================================
