//! # shopfront-core: Domain Types for the Shopfront Client
//!
//! This crate holds the data shapes exchanged with the shop backend and the
//! checks run on user input before it is sent. It has no I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Page-level caller (CLI, web page, ...)             │   │
//! │  │     login form ──► product list ──► cart ──► checkout           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopfront-client (I/O layer)                    │   │
//! │  │     Gateway, SessionStore, resource clients, guards             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐                 │   │
//! │  │   │   types   │  │   error    │  │ validation │                 │   │
//! │  │   │ User,Role │  │ Validation │  │  email,    │                 │   │
//! │  │   │ DTOs, Nav │  │   Error    │  │  quantity  │                 │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Role, request bodies, Navigation)
//! - [`error`] - Validation error types
//! - [`validation`] - Input checks for login, registration and cart forms
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{Role, User};
//!
//! let user: User = serde_json::from_str(r#"{"name":"Ada","role":"admin"}"#).unwrap();
//! assert!(user.is_admin());
//! assert_eq!(user.role, Some(Role::Admin));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Role marker the backend uses for administrators.
pub const ADMIN_ROLE: &str = "admin";

/// Role marker the backend uses for regular shoppers.
pub const CUSTOMER_ROLE: &str = "customer";

/// Maximum quantity of a single product in the cart.
///
/// Guards against typing 1000 instead of 10. The backend enforces its own
/// stock limits on top of this.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LEN: usize = 6;
