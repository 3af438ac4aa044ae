//! # Domain Types
//!
//! Types exchanged with the shop backend and handed to page-level callers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  AuthResponse   │   │   Navigation    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (EntityId)  │   │  success        │   │  Landing        │       │
//! │  │  name, email    │   │  token          │   │  UserLogin      │       │
//! │  │  role (Role)    │   │  user           │   │  AdminLogin     │       │
//! │  │  ..extra        │   │  message        │   │  AdminDashboard │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Request bodies: Credentials, Registration, CartItemRequest,           │
//! │                  QuantityUpdate, StatusUpdate                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cached Records Round-Trip
//! The backend owns the user shape. Fields this crate does not know about are
//! kept in `extra` so a cached user serializes back to what was received.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::{ADMIN_ROLE, CUSTOMER_ROLE};

// =============================================================================
// Entity Identifier
// =============================================================================

/// Identifier of a backend entity.
///
/// Backends hand out either numeric ids or string ids (UUIDs, ObjectIds).
/// Both are accepted and written back in their original form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// Digits parse as a numeric id, anything else is kept as text.
impl std::str::FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(EntityId::Number)
            .unwrap_or_else(|_| EntityId::Text(s.to_string())))
    }
}

// =============================================================================
// Role
// =============================================================================

/// Account role as reported by the backend.
///
/// Unknown roles are kept verbatim so they survive a cache round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Customer,
    Other(String),
}

impl Role {
    /// Returns the wire form of the role.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => ADMIN_ROLE,
            Role::Customer => CUSTOMER_ROLE,
            Role::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            ADMIN_ROLE => Role::Admin,
            CUSTOMER_ROLE => Role::Customer,
            _ => Role::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A user record as returned by `/auth/login`, `/auth/me` and `/users`.
///
/// This is a display cache only. The session token decides what the backend
/// lets the caller do.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub role: Option<Role>,

    /// Backend fields not modelled above.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl User {
    /// True iff the role field equals the admin marker.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Some(Role::Admin))
    }

    /// Builds a user from any JSON object without rejecting it.
    ///
    /// Known fields with an unexpected type stay in `extra` under their own
    /// key, so the record still serializes back to what was received.
    /// Returns `None` when `value` is not an object.
    pub fn from_value_lenient(value: Value) -> Option<User> {
        let Value::Object(mut map) = value else {
            return None;
        };

        Some(User {
            id: take_typed(&mut map, "id"),
            name: take_typed(&mut map, "name"),
            email: take_typed(&mut map, "email"),
            role: take_typed::<String>(&mut map, "role").map(Role::from),
            extra: map,
        })
    }

    /// Name to greet the user with, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("guest")
    }
}

// =============================================================================
// Auth Envelope
// =============================================================================

/// Success envelope of the auth endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Value> for AuthResponse {
    /// Lenient decode of an auth payload.
    ///
    /// `success` follows JSON truthiness. A `token` or `message` that is not a
    /// string stays in `extra`. The `user` object is decoded with
    /// [`User::from_value_lenient`].
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return AuthResponse::default();
        };

        let success = map.remove("success").is_some_and(|v| is_truthy(&v));
        let token = take_typed(&mut map, "token");
        let message = take_typed(&mut map, "message");
        let user = match map.remove("user") {
            Some(Value::Null) | None => None,
            Some(Value::Object(obj)) => User::from_value_lenient(Value::Object(obj)),
            Some(other) => {
                map.insert("user".to_string(), other);
                None
            }
        };

        AuthResponse {
            success,
            token,
            user,
            message,
            extra: map,
        }
    }
}

/// Removes `key` from `map` when it decodes as `T`; a null is dropped.
/// Anything else is left in place.
fn take_typed<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<T> {
    match map.get(key)? {
        Value::Null => {
            map.remove(key);
            None
        }
        value => {
            let decoded = serde_json::from_value(value.clone()).ok()?;
            map.remove(key);
            Some(decoded)
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItemRequest {
    pub product_id: EntityId,
    pub quantity: i64,
}

/// Body of `PUT /cart/{productId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

// =============================================================================
// Navigation
// =============================================================================

/// A view the caller is asked to move to.
///
/// Guards and auth flows never navigate themselves; they return one of these
/// and the page-level caller decides how to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Navigation {
    /// Default landing view.
    Landing,
    /// Shopper login form.
    UserLogin,
    /// Shopper registration form.
    UserRegister,
    /// Administrator login form.
    AdminLogin,
    /// Administrator dashboard.
    AdminDashboard,
}

impl Navigation {
    /// Page the view lives at.
    pub fn path(&self) -> &'static str {
        match self {
            Navigation::Landing => "index.html",
            Navigation::UserLogin => "user-login.html",
            Navigation::UserRegister => "user-register.html",
            Navigation::AdminLogin => "admin-login.html",
            Navigation::AdminDashboard => "admin.html",
        }
    }

    /// Where a freshly logged-in user goes, by role.
    pub fn after_login(user: &User) -> Self {
        if user.is_admin() {
            Navigation::AdminDashboard
        } else {
            Navigation::Landing
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_wire_form() {
        assert_eq!(Role::from("admin".to_string()), Role::Admin);
        assert_eq!(Role::from("customer".to_string()), Role::Customer);
        assert_eq!(
            Role::from("staff".to_string()),
            Role::Other("staff".to_string())
        );
        assert_eq!(String::from(Role::Other("staff".into())), "staff");
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let raw = json!({
            "id": "64f0c2",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "customer",
            "createdAt": "2024-01-01T00:00:00Z",
            "address": { "city": "Leeds" }
        });

        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id, Some(EntityId::from("64f0c2")));
        assert_eq!(user.role, Some(Role::Customer));
        assert_eq!(user.extra.len(), 2);
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_lenient_user_keeps_mistyped_fields() {
        let raw = json!({ "id": 3, "name": 5, "email": null, "role": "admin", "tags": [] });

        let user = User::from_value_lenient(raw).unwrap();
        assert_eq!(user.id, Some(EntityId::Number(3)));
        assert!(user.name.is_none());
        assert!(user.is_admin());
        assert_eq!(user.extra.get("name"), Some(&json!(5)));
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "id": 3, "name": 5, "role": "admin", "tags": [] })
        );
        assert!(User::from_value_lenient(json!("ada")).is_none());
    }

    #[test]
    fn test_auth_response_from_loose_payload() {
        let response = AuthResponse::from(json!({
            "success": 1,
            "token": "T",
            "message": { "text": "hi" },
            "user": { "id": "u1", "name": false }
        }));

        assert!(response.success);
        assert_eq!(response.token.as_deref(), Some("T"));
        assert!(response.message.is_none());
        assert_eq!(response.extra.get("message"), Some(&json!({ "text": "hi" })));
        let user = response.user.unwrap();
        assert_eq!(user.id, Some(EntityId::from("u1")));
        assert_eq!(user.extra.get("name"), Some(&json!(false)));

        assert!(!AuthResponse::from(json!({ "success": "" })).success);
        assert_eq!(AuthResponse::from(json!([1, 2])), AuthResponse::default());
    }

    #[test]
    fn test_user_binding_fields_are_optional() {
        let decl = User::decl();
        for field in ["id?:", "name?: string", "email?: string", "role?: string"] {
            assert!(decl.contains(field), "{} missing from {}", field, decl);
        }
        assert!(!decl.contains("| null"), "{}", decl);
    }

    #[test]
    fn test_entity_id_from_str() {
        assert_eq!("42".parse::<EntityId>().unwrap(), EntityId::Number(42));
        assert_eq!(
            "64f0c2".parse::<EntityId>().unwrap(),
            EntityId::Text("64f0c2".into())
        );
    }

    #[test]
    fn test_numeric_entity_id() {
        let user: User = serde_json::from_value(json!({ "id": 42 })).unwrap();
        assert_eq!(user.id, Some(EntityId::Number(42)));
        assert_eq!(user.id.unwrap().to_string(), "42");
    }

    #[test]
    fn test_is_admin() {
        let mut user = User::default();
        assert!(!user.is_admin());

        user.role = Some(Role::Customer);
        assert!(!user.is_admin());

        user.role = Some(Role::Admin);
        assert!(user.is_admin());
    }

    #[test]
    fn test_display_name_fallback() {
        let mut user = User::default();
        assert_eq!(user.display_name(), "guest");

        user.email = Some("ada@example.com".into());
        assert_eq!(user.display_name(), "ada@example.com");

        user.name = Some("Ada".into());
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_auth_response_defaults() {
        let resp: AuthResponse = serde_json::from_value(json!({ "message": "ok" })).unwrap();
        assert!(!resp.success);
        assert!(resp.token.is_none());
        assert_eq!(resp.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_cart_item_request_is_camel_case() {
        let body = CartItemRequest {
            product_id: EntityId::from("p-1"),
            quantity: 2,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "productId": "p-1", "quantity": 2 })
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("a@b.com", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_navigation_after_login() {
        let admin = User {
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert_eq!(Navigation::after_login(&admin), Navigation::AdminDashboard);
        assert_eq!(
            Navigation::after_login(&User::default()),
            Navigation::Landing
        );
        assert_eq!(Navigation::AdminLogin.path(), "admin-login.html");
    }
}
