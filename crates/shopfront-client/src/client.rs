//! # Shop Client
//!
//! One handle that owns the gateway and session and hands out the resource
//! clients, guards and auth flows.
//!
//! ```rust,ignore
//! let client = ShopClient::from_config(&ClientConfig::load(None)?)?;
//!
//! client.auth().login("ada@example.com", "secret").await?;
//! if client.guard().require_auth().is_granted() {
//!     let cart = client.cart().get().await?;
//! }
//! ```

use std::sync::Arc;

use tracing::info;

use crate::config::ClientConfig;
use crate::endpoint::ApiBase;
use crate::error::ClientResult;
use crate::flows::AuthFlow;
use crate::gateway::Gateway;
use crate::guards::AccessGuard;
use crate::resources::{AuthApi, CartApi, OrdersApi, ProductsApi, UsersApi};
use crate::session::SessionStore;
use crate::transport::{HttpTransport, ReqwestTransport};

#[derive(Debug, Clone)]
pub struct ShopClient {
    gateway: Gateway,
}

impl ShopClient {
    /// Builds a client from configuration, resolving the API base once.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let base = config.api_base()?;
        let session = config.build_session_store()?;
        let transport = Arc::new(ReqwestTransport::new()?);

        info!(base = %base, session = %config.session.backend, "Shop client ready");
        Ok(Self::from_parts(base, session, transport)
            .with_request_logging(config.logging.log_requests))
    }

    /// Builds a client from explicit parts.
    pub fn from_parts(
        base: ApiBase,
        session: SessionStore,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        ShopClient {
            gateway: Gateway::new(base, session, transport),
        }
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.gateway = self.gateway.with_request_logging(enabled);
        self
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &SessionStore {
        self.gateway.session()
    }

    pub fn base(&self) -> &ApiBase {
        self.gateway.base()
    }

    // =========================================================================
    // Resource Clients
    // =========================================================================

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.gateway)
    }

    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(&self.gateway)
    }

    pub fn cart(&self) -> CartApi<'_> {
        CartApi::new(&self.gateway)
    }

    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(&self.gateway)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.gateway)
    }

    // =========================================================================
    // Guards and Flows
    // =========================================================================

    pub fn guard(&self) -> AccessGuard<'_> {
        AccessGuard::new(self.gateway.session())
    }

    pub fn flows(&self) -> AuthFlow<'_> {
        AuthFlow::new(&self.gateway)
    }
}
