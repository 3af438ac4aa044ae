//! # CLI Error Type
//!
//! What the user sees when a command does not go through.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Error Flow in the CLI                            │
//! │                                                                         │
//! │  ClientError ──.or_fail("Login")──► CliError::Failed                   │
//! │                                     "Login failed: invalid credentials"│
//! │                                                                         │
//! │  Access::Redirect(nav) ───────────► CliError::AccessDenied             │
//! │                                     "Please sign in first (user-...)"  │
//! │                                                                         │
//! │  bad JSON argument ───────────────► CliError::InvalidJson              │
//! │                                                                         │
//! │  main(): eprintln!("{}", err); exit(1)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_client::{ClientError, ErrorKind};
use shopfront_core::Navigation;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A client call failed.
    #[error("{action} failed: {source}")]
    Failed {
        action: &'static str,
        #[source]
        source: ClientError,
    },

    /// A local guard refused the command.
    #[error("{reason} ({})", .redirect.path())]
    AccessDenied {
        reason: &'static str,
        redirect: Navigation,
    },

    /// A JSON argument did not parse.
    #[error("Invalid JSON argument: {0}")]
    InvalidJson(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(ClientError),
}

impl CliError {
    pub fn access_denied(redirect: Navigation) -> Self {
        let reason = match redirect {
            Navigation::AdminLogin => "Administrator sign-in required",
            _ => "Please sign in first",
        };
        CliError::AccessDenied { reason, redirect }
    }

    /// True when the backend could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, CliError::Failed { source, .. } if source.kind() == ErrorKind::Network)
    }
}

/// Labels a client failure with the action the user attempted.
pub trait OrFail<T> {
    fn or_fail(self, action: &'static str) -> CliResult<T>;
}

impl<T> OrFail<T> for Result<T, ClientError> {
    fn or_fail(self, action: &'static str) -> CliResult<T> {
        self.map_err(|source| CliError::Failed { action, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_message() {
        let err: CliResult<()> =
            Err(ClientError::from_api_payload(401, json!({ "message": "invalid credentials" })))
                .or_fail("Login");
        assert_eq!(
            err.unwrap_err().to_string(),
            "Login failed: invalid credentials"
        );
    }

    #[test]
    fn test_network_failure() {
        let err = Err::<(), _>(ClientError::Network("connection refused".into()))
            .or_fail("Loading products")
            .unwrap_err();
        assert!(err.is_network());
        assert_eq!(
            err.to_string(),
            "Loading products failed: Network error: connection refused"
        );
    }

    #[test]
    fn test_access_denied_message() {
        assert_eq!(
            CliError::access_denied(Navigation::UserLogin).to_string(),
            "Please sign in first (user-login.html)"
        );
        assert_eq!(
            CliError::access_denied(Navigation::AdminLogin).to_string(),
            "Administrator sign-in required (admin-login.html)"
        );
    }
}
