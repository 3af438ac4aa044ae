//! # Request Gateway
//!
//! Issues backend calls and normalizes every outcome.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Gateway::request                                │
//! │                                                                         │
//! │  endpoint + RequestOptions                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Content-Type: application/json                                     │
//! │     Authorization: Bearer <token>     (only if a token is stored)      │
//! │     caller headers override Content-Type, never a stored token         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. transport.send({base}{endpoint}) ──── Err ──► Network              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. decode body as JSON (any status) ──── Err ──► ServerResponse       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. status not 2xx ───────────────────────────► Api{status,msg,data}   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. Ok(payload)  (returned as-is, no envelope unwrapping)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gateway keeps no state between calls. Concurrent calls for the same
//! resource each hit the network; nothing is retried, deduplicated or timed
//! out here.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};
use uuid::Uuid;

use crate::endpoint::ApiBase;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use crate::transport::{HttpRequest, HttpTransport};

// =============================================================================
// Request Options
// =============================================================================

/// Per-call settings: method, extra headers and a pre-serialized body.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method. Defaults to GET.
    pub method: Method,
    /// Headers merged over the defaults; later entries win.
    pub headers: Vec<(String, String)>,
    /// Body sent verbatim.
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        RequestOptions {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Adds a header that overrides any default of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a pre-serialized body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `body` as JSON.
    pub fn json_body<T: Serialize + ?Sized>(self, body: &T) -> ClientResult<Self> {
        let encoded = serde_json::to_string(body)
            .map_err(|e| ClientError::InvalidRequest(format!("body is not serializable: {}", e)))?;
        Ok(self.body(encoded))
    }
}

// =============================================================================
// Gateway
// =============================================================================

/// Sends requests to the backend and turns responses into results.
///
/// ## Usage
/// ```rust,ignore
/// let gateway = Gateway::new(base, session, Arc::new(ReqwestTransport::new()?));
///
/// let products = gateway.request("/products", RequestOptions::get()).await?;
/// ```
#[derive(Clone)]
pub struct Gateway {
    base: ApiBase,
    session: SessionStore,
    transport: Arc<dyn HttpTransport>,
    log_requests: bool,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base", &self.base)
            .field("log_requests", &self.log_requests)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(base: ApiBase, session: SessionStore, transport: Arc<dyn HttpTransport>) -> Self {
        Gateway {
            base,
            session,
            transport,
            log_requests: true,
        }
    }

    /// Turns per-request diagnostics on or off.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sends a request and returns the decoded success payload.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Value> {
        self.send(endpoint, options).await.map(|(_, data)| data)
    }

    /// Like [`Gateway::request`] but decodes the payload into `T`.
    ///
    /// A payload that does not fit `T` is reported the same way as a body
    /// that is not JSON at all.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let (status, data) = self.send(endpoint, options).await?;
        serde_json::from_value(data).map_err(|e| {
            if self.log_requests {
                error!(endpoint, status, error = %e, "Unexpected API response shape");
            }
            ClientError::ServerResponse {
                status,
                reason: e.to_string(),
            }
        })
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> ClientResult<(u16, Value)> {
        let request_id = Uuid::new_v4();
        let url = self.base.join(endpoint);
        let method = options.method.clone();
        let headers = self.build_headers(&options.headers)?;

        if self.log_requests {
            debug!(%request_id, %method, %url, "API request");
        }

        let request = HttpRequest {
            method: options.method,
            url,
            headers,
            body: options.body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                if self.log_requests {
                    error!(%request_id, %method, endpoint, error = %e, "API request failed: no response");
                }
                return Err(ClientError::Network(e.0));
            }
        };
        let status = response.status;

        let data: Value = match serde_json::from_slice(&response.body) {
            Ok(data) => data,
            Err(e) => {
                if self.log_requests {
                    error!(%request_id, %method, endpoint, status, error = %e, "Failed to parse JSON response");
                }
                return Err(ClientError::ServerResponse {
                    status,
                    reason: e.to_string(),
                });
            }
        };

        if !response.is_success() {
            let err = ClientError::from_api_payload(status, data);
            if self.log_requests {
                error!(%request_id, %method, endpoint, status, message = %err, "API error response");
            }
            return Err(err);
        }

        if self.log_requests {
            debug!(%request_id, %method, endpoint, status, "API success");
        }
        Ok((status, data))
    }

    fn build_headers(&self, overrides: &[(String, String)]) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidRequest(format!("invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                ClientError::InvalidRequest(format!("invalid value for header {}", name))
            })?;
            headers.insert(name, value);
        }

        // A stored token always wins over a caller-supplied Authorization.
        if let Some(token) = self.session.get_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ClientError::InvalidRequest("stored token is not a valid header value".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}
