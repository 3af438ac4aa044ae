//! # Access Guards
//!
//! Local checks on the cached session, used to pick a view before any
//! request is made.
//!
//! ```text
//! require_auth    token?            ─ no ─► Redirect(UserLogin)
//! require_admin   token? and admin? ─ no ─► Redirect(AdminLogin)
//! ```
//!
//! These checks are advisory. The token is not verified and the cached role
//! can be stale; the backend is the authority on every request.

use shopfront_core::Navigation;

use crate::session::SessionStore;

/// Result of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Caller should move to this view instead.
    Redirect(Navigation),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }

    /// The view to move to, if access was refused.
    pub fn redirect(&self) -> Option<Navigation> {
        match self {
            Access::Granted => None,
            Access::Redirect(nav) => Some(*nav),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AccessGuard<'a> {
    session: &'a SessionStore,
}

impl<'a> AccessGuard<'a> {
    pub fn new(session: &'a SessionStore) -> Self {
        AccessGuard { session }
    }

    /// A token is stored. No expiry check, no round-trip.
    pub fn is_authenticated(&self) -> bool {
        self.session.get_token().is_some()
    }

    /// The cached user has the admin role.
    pub fn is_admin(&self) -> bool {
        self.session
            .get_user()
            .map(|user| user.is_admin())
            .unwrap_or(false)
    }

    pub fn require_auth(&self) -> Access {
        if self.is_authenticated() {
            Access::Granted
        } else {
            Access::Redirect(Navigation::UserLogin)
        }
    }

    pub fn require_admin(&self) -> Access {
        if self.is_authenticated() && self.is_admin() {
            Access::Granted
        } else {
            Access::Redirect(Navigation::AdminLogin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopfront_core::User;

    fn user(role: &str) -> User {
        serde_json::from_value(json!({ "id": 1, "name": "Ada", "role": role })).unwrap()
    }

    #[test]
    fn test_is_admin_by_cached_role() {
        let session = SessionStore::in_memory();
        let guard = AccessGuard::new(&session);
        assert!(!guard.is_admin());

        session.set_user(&user("customer")).unwrap();
        assert!(!guard.is_admin());

        session.set_user(&user("admin")).unwrap();
        assert!(guard.is_admin());
    }

    #[test]
    fn test_require_auth() {
        let session = SessionStore::in_memory();
        let guard = AccessGuard::new(&session);

        assert_eq!(guard.require_auth(), Access::Redirect(Navigation::UserLogin));
        assert!(!guard.require_auth().is_granted());

        session.set_token("T").unwrap();
        assert!(guard.is_authenticated());
        assert_eq!(guard.require_auth(), Access::Granted);
        assert_eq!(guard.require_auth().redirect(), None);
    }

    #[test]
    fn test_require_admin() {
        let session = SessionStore::in_memory();
        let guard = AccessGuard::new(&session);

        // Admin user cached but no token.
        session.set_user(&user("admin")).unwrap();
        assert_eq!(
            guard.require_admin(),
            Access::Redirect(Navigation::AdminLogin)
        );

        session.set_session("T", &user("customer")).unwrap();
        assert_eq!(
            guard.require_admin().redirect(),
            Some(Navigation::AdminLogin)
        );

        session.set_session("T", &user("admin")).unwrap();
        assert!(guard.require_admin().is_granted());
    }
}
