//! Authentication endpoints and their effect on the session.
//!
//! Auth payloads are decoded leniently: a 2xx response is never turned into
//! an error because a user field has an unexpected type.

use serde::Serialize;
use shopfront_core::{AuthResponse, Credentials, Navigation};
use tracing::{debug, info};

use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};

/// Register, log in, log out and refresh the cached user.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        AuthApi { gateway }
    }

    /// `POST /auth/register`. Does not touch the session.
    pub async fn register<T: Serialize + ?Sized>(&self, data: &T) -> ClientResult<AuthResponse> {
        let data = self
            .gateway
            .request("/auth/register", RequestOptions::post().json_body(data)?)
            .await?;
        Ok(AuthResponse::from(data))
    }

    /// `POST /auth/login`.
    ///
    /// When the backend reports success with both a token and a user, the
    /// pair is persisted in one write. Any other successful response leaves
    /// the session as it was.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = Credentials::new(email, password);
        let data = self
            .gateway
            .request("/auth/login", RequestOptions::post().json_body(&body)?)
            .await?;
        let response = AuthResponse::from(data);

        let token = response.token.as_deref().filter(|t| !t.is_empty());
        match (response.success, token, response.user.as_ref()) {
            (true, Some(token), Some(user)) => {
                self.gateway.session().set_session(token, user)?;
                info!(user = user.display_name(), admin = user.is_admin(), "Logged in");
            }
            _ => debug!(success = response.success, "Login response not persisted"),
        }

        Ok(response)
    }

    /// Clears the local session. No network call is made.
    pub fn logout(&self) -> ClientResult<Navigation> {
        self.gateway.session().clear_session()?;
        info!("Logged out");
        Ok(Navigation::Landing)
    }

    /// `GET /auth/me`. A successful response refreshes the cached user.
    pub async fn get_current_user(&self) -> ClientResult<AuthResponse> {
        let data = self
            .gateway
            .request("/auth/me", RequestOptions::get())
            .await?;
        let response = AuthResponse::from(data);

        if response.success {
            if let Some(user) = &response.user {
                self.gateway.session().set_user(user)?;
            }
        }

        Ok(response)
    }
}
