//! # Resource Clients
//!
//! Thin per-resource wrappers over the [`Gateway`](crate::gateway::Gateway).
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Resource Clients                               │
//! │                                                                         │
//! │  AuthApi       POST /auth/register   POST /auth/login   GET /auth/me   │
//! │  ProductsApi   GET|POST /products    GET|PUT|DELETE /products/{id}     │
//! │  CartApi       GET|POST|DELETE /cart PUT|DELETE /cart/{productId}      │
//! │  OrdersApi     GET|POST /orders      GET|DELETE /orders/{id}           │
//! │                PUT /orders/{id}/status                                 │
//! │  UsersApi      GET /users            GET|PUT|DELETE /users/{id}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each client borrows the gateway, so constructing one is free. Payloads
//! other than the auth envelope are returned as raw JSON; the backend owns
//! their shape.

mod auth;
mod cart;
mod orders;
mod products;
mod users;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use orders::OrdersApi;
pub use products::{ProductQuery, ProductsApi};
pub use users::UsersApi;

use std::fmt::Display;

/// `{collection}/{id}`
fn item_path(collection: &str, id: impl Display) -> String {
    format!("{}/{}", collection, id)
}
