//! # shopfront-client: REST Client for the Shopfront Backend
//!
//! Everything that talks to the network or touches persisted state lives
//! here: base URL resolution, the session store, the request gateway and
//! the per-resource clients built on it.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Request Flow                                   │
//! │                                                                         │
//! │   ShopClient                                                           │
//! │     │  .auth() .products() .cart() .orders() .users()                  │
//! │     ▼                                                                   │
//! │   Resource client ── endpoint, method, JSON body                       │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │   Gateway ◄──── SessionStore (bearer token)                            │
//! │     │           ApiBase (resolved once from ClientConfig)              │
//! │     ▼                                                                   │
//! │   HttpTransport (reqwest) ──► backend                                  │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │   Ok(JSON) | Err(Network | ServerResponse | Api)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`endpoint`] - Page origin to API base URL
//! - [`session`] - Token and cached user persistence
//! - [`transport`] - HTTP seam (reqwest in production)
//! - [`gateway`] - Request assembly and outcome normalization
//! - [`resources`] - auth, products, cart, orders, users
//! - [`guards`] - Local access checks
//! - [`flows`] - Login, admin login, registration and session checks
//! - [`config`] - TOML + environment configuration
//! - [`client`] - The [`ShopClient`] façade
//! - [`error`] - Error types
//!
//! ## Not Handled
//!
//! No retries, caching, timeouts or token refresh. An expired token is only
//! noticed when the backend rejects a request with it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod flows;
pub mod gateway;
pub mod guards;
pub mod resources;
pub mod session;
pub mod transport;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::ShopClient;
pub use config::{ClientConfig, SessionBackendKind};
pub use endpoint::{resolve_base_url, ApiBase, PageOrigin};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use flows::{AuthFlow, AuthStatus, LoginOutcome};
pub use gateway::{Gateway, RequestOptions};
pub use guards::{Access, AccessGuard};
pub use resources::ProductQuery;
pub use session::{FileBackend, MemoryBackend, Session, SessionBackend, SessionStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
