//! # Endpoint Resolver
//!
//! Derives the backend base URL from the origin the client is serving.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Base URL Resolution                                │
//! │                                                                         │
//! │  Page origin                          API base                         │
//! │  ───────────                          ────────                         │
//! │  http://localhost:3000            ──► http://localhost:5000/api        │
//! │  https://127.0.0.1                ──► http://localhost:5000/api        │
//! │  http://192.168.1.20:8080         ──► http://192.168.1.20:5000/api     │
//! │  https://shop.lan                 ──► https://shop.lan:5000/api        │
//! │                                                                         │
//! │  Loopback always maps to the fixed loopback URL. Anything else keeps   │
//! │  the page's protocol and host and swaps in the API port.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same build works for local development and LAN access without
//! per-environment settings. The result is computed once at startup and
//! stored in [`crate::config::ClientConfig`]; it is never re-resolved.

use std::fmt;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Port the backend API listens on.
pub const DEFAULT_API_PORT: u16 = 5000;

/// Hostnames treated as the local machine.
pub const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

// =============================================================================
// Page Origin
// =============================================================================

/// The protocol and hostname of the page the client runs for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    /// Protocol including the trailing colon, e.g. `https:`.
    pub protocol: String,
    /// Hostname without port.
    pub hostname: String,
}

impl PageOrigin {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>) -> Self {
        PageOrigin {
            protocol: protocol.into(),
            hostname: hostname.into(),
        }
    }

    /// Parses an origin out of a full page URL.
    ///
    /// ```rust
    /// use shopfront_client::endpoint::PageOrigin;
    ///
    /// let origin = PageOrigin::parse("http://shop.lan:8080/cart.html").unwrap();
    /// assert_eq!(origin.protocol, "http:");
    /// assert_eq!(origin.hostname, "shop.lan");
    /// ```
    pub fn parse(page_url: &str) -> ClientResult<Self> {
        let url = Url::parse(page_url)?;
        let hostname = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidConfig(format!("page URL has no host: {}", page_url)))?;

        Ok(PageOrigin {
            protocol: format!("{}:", url.scheme()),
            hostname: hostname.to_string(),
        })
    }

    /// True if the hostname names the local machine.
    pub fn is_loopback(&self) -> bool {
        LOOPBACK_HOSTS.contains(&self.hostname.as_str())
    }
}

impl Default for PageOrigin {
    fn default() -> Self {
        PageOrigin::new("http:", "localhost")
    }
}

// =============================================================================
// API Base
// =============================================================================

/// Resolved base URL every endpoint path is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Wraps an explicit base URL. A trailing slash is dropped so that
    /// endpoint paths (which start with `/`) join cleanly.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        ApiBase(base)
    }

    /// Full URL for an endpoint path, `{base}{endpoint}`.
    pub fn join(&self, endpoint: &str) -> String {
        format!("{}{}", self.0, endpoint)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves the API base for a page origin.
///
/// Pure function of the origin and port. Never fails.
pub fn resolve_base_url(origin: &PageOrigin, port: u16) -> ApiBase {
    if origin.is_loopback() {
        ApiBase(format!("http://localhost:{}/api", port))
    } else {
        ApiBase(format!(
            "{}//{}:{}/api",
            origin.protocol, origin.hostname, port
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_ignores_protocol() {
        for host in LOOPBACK_HOSTS {
            for protocol in ["http:", "https:"] {
                let base = resolve_base_url(&PageOrigin::new(protocol, host), DEFAULT_API_PORT);
                assert_eq!(base.as_str(), "http://localhost:5000/api");
            }
        }
    }

    #[test]
    fn test_network_host_keeps_protocol_and_host() {
        for protocol in ["http:", "https:"] {
            for host in ["192.168.1.20", "shop.lan", "10.0.0.7"] {
                let base = resolve_base_url(&PageOrigin::new(protocol, host), DEFAULT_API_PORT);
                assert_eq!(base.as_str(), format!("{}//{}:5000/api", protocol, host));
            }
        }
    }

    #[test]
    fn test_custom_port() {
        let base = resolve_base_url(&PageOrigin::new("https:", "shop.lan"), 8443);
        assert_eq!(base.as_str(), "https://shop.lan:8443/api");
    }

    #[test]
    fn test_parse_origin_drops_port_and_path() {
        let origin = PageOrigin::parse("https://192.168.1.20:3000/products.html?x=1").unwrap();
        assert_eq!(origin, PageOrigin::new("https:", "192.168.1.20"));
        assert!(!origin.is_loopback());

        let origin = PageOrigin::parse("http://127.0.0.1:8080/").unwrap();
        assert!(origin.is_loopback());
    }

    #[test]
    fn test_parse_origin_rejects_garbage() {
        assert!(PageOrigin::parse("not a url").is_err());
    }

    #[test]
    fn test_api_base_join() {
        let base = ApiBase::new("https://api.example.com/api/");
        assert_eq!(base.as_str(), "https://api.example.com/api");
        assert_eq!(base.join("/auth/me"), "https://api.example.com/api/auth/me");
    }
}
