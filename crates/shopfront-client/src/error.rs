//! # Client Error Types
//!
//! Error types for gateway calls, session persistence and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Network      │  │ ServerResponse  │  │          Api            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  no response    │  │  body is not    │  │  non-2xx with JSON body │ │
//! │  │  obtained       │  │  valid JSON     │  │  status+message+data    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Local                                     │   │
//! │  │  InvalidRequest • Storage • Validation • Config load/save        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure path in the gateway produces exactly one of the three
//! remote variants. Nothing here is retried or swallowed.

use serde_json::Value;
use shopfront_core::ValidationError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was obtained.
    Network,
    /// A response arrived but its body could not be decoded.
    ServerResponse,
    /// The backend answered with a failure status.
    Api,
    /// The failure happened before or after the network call.
    Local,
}

/// Client error type covering all possible client failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// The transport failed before a response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not decodable as the expected JSON.
    #[error("Server returned invalid response (Status: {status})")]
    ServerResponse { status: u16, reason: String },

    /// The backend answered with a non-2xx status.
    ///
    /// `message` comes from the payload's `message` or `error` field and
    /// `data` is the full decoded payload.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        data: Value,
    },

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// The request could not be assembled (bad header, unserializable body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The session backend could not be written.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Form input was rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidConfig(format!("invalid URL: {}", err))
    }
}

// =============================================================================
// Error Inspection
// =============================================================================

impl ClientError {
    /// Builds an [`ClientError::Api`] from a failure status and its payload.
    ///
    /// The message is the payload's `message`, else its `error`, else a
    /// generic "Request failed with status N".
    pub fn from_api_payload(status: u16, data: Value) -> Self {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| {
                data.get(*key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        ClientError::Api {
            status,
            message,
            data,
        }
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::ServerResponse { .. } => ErrorKind::ServerResponse,
            ClientError::Api { .. } => ErrorKind::Api,
            _ => ErrorKind::Local,
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ServerResponse { status, .. } | ClientError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Decoded failure payload, for [`ClientError::Api`] only.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ClientError::Api { data, .. } => Some(data),
            _ => None,
        }
    }

    /// True when the backend rejected the credentials or the token.
    ///
    /// Callers use this to notice an invalid session and clear it.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}
