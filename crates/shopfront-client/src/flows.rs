//! # Auth Flows
//!
//! Page-level sign-in handling: validate the form, call the backend, update
//! the session and say which view comes next.
//!
//! ## Flow Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Auth Flows                                   │
//! │                                                                         │
//! │  user_login    success ──► admin? ── yes ──► Redirect(AdminDashboard)  │
//! │                                   └─ no ───► Redirect(Landing)         │
//! │                                                                         │
//! │  admin_login   success ──► admin? ── yes ──► Redirect(AdminDashboard)  │
//! │                                   └─ no ───► session cleared,          │
//! │                                              AccessDenied(Landing)     │
//! │                                                                         │
//! │  register      success ──────────────────► Redirect(UserLogin)        │
//! │                                                                         │
//! │  any flow      success == false ─────────► NotAccepted(message)       │
//! │                error ────────────────────► Err(ClientError)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here renders or navigates. The caller shows the outcome however
//! it likes.

use shopfront_core::validation::{validate_credentials, validate_registration};
use shopfront_core::{AuthResponse, Credentials, Navigation, Registration, User};
use tracing::{info, warn};

use crate::error::ClientResult;
use crate::gateway::Gateway;
use crate::resources::AuthApi;

// =============================================================================
// Outcomes
// =============================================================================

/// Session state after checking it against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    /// Token accepted; the cached user.
    SignedIn(User),
    /// No cached token and user.
    SignedOut,
    /// The backend rejected the stored session. It has been cleared.
    Expired(Navigation),
}

/// What a login or registration attempt led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Accepted; move to this view.
    Redirect(Navigation),
    /// Credentials were valid but lack the required role. The session has
    /// been cleared.
    AccessDenied(Navigation),
    /// The backend answered without `success`, optionally with a message.
    NotAccepted(Option<String>),
}

// =============================================================================
// Auth Flow
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct AuthFlow<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthFlow<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        AuthFlow { gateway }
    }

    fn auth(&self) -> AuthApi<'a> {
        AuthApi::new(self.gateway)
    }

    /// Verifies the cached session with `GET /auth/me`.
    ///
    /// Any failure of that call, not only a 401, signs the user out.
    pub async fn check_auth_status(&self) -> ClientResult<AuthStatus> {
        let session = self.gateway.session();
        let cached = match (session.get_token(), session.get_user()) {
            (Some(_), Some(user)) => user,
            _ => return Ok(AuthStatus::SignedOut),
        };

        if let Err(e) = self.auth().get_current_user().await {
            warn!(error = %e, "Stored session rejected, signing out");
            let next = self.auth().logout()?;
            return Ok(AuthStatus::Expired(next));
        }

        Ok(AuthStatus::SignedIn(session.get_user().unwrap_or(cached)))
    }

    /// Shopper login. Admins are sent to the dashboard.
    pub async fn user_login(&self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let response = self.login(email, password).await?;
        if !response.success {
            return Ok(LoginOutcome::NotAccepted(response.message));
        }

        let user = response.user.unwrap_or_default();
        Ok(LoginOutcome::Redirect(Navigation::after_login(&user)))
    }

    /// Administrator login. A non-admin account is signed straight back out.
    pub async fn admin_login(&self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let response = self.login(email, password).await?;
        if !response.success {
            return Ok(LoginOutcome::NotAccepted(response.message));
        }

        let is_admin = response.user.as_ref().map(User::is_admin).unwrap_or(false);
        if is_admin {
            Ok(LoginOutcome::Redirect(Navigation::AdminDashboard))
        } else {
            warn!(email, "Admin login refused for non-admin account");
            let next = self.auth().logout()?;
            Ok(LoginOutcome::AccessDenied(next))
        }
    }

    /// Creates an account. The user still has to log in afterwards.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let form = Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate_registration(&form)?;

        let response = self.auth().register(&form).await?;
        if !response.success {
            return Ok(LoginOutcome::NotAccepted(response.message));
        }

        info!(email = %form.email, "Registered account");
        Ok(LoginOutcome::Redirect(Navigation::UserLogin))
    }

    pub fn logout(&self) -> ClientResult<Navigation> {
        self.auth().logout()
    }

    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let credentials = Credentials::new(email.trim(), password);
        validate_credentials(&credentials)?;
        self.auth()
            .login(&credentials.email, &credentials.password)
            .await
    }
}
