//! Order endpoints.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use shopfront_core::StatusUpdate;

use super::item_path;
use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};

#[derive(Debug, Clone, Copy)]
pub struct OrdersApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> OrdersApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        OrdersApi { gateway }
    }

    /// Orders visible to the session: the caller's own, or all for admins.
    pub async fn get_all(&self) -> ClientResult<Value> {
        self.gateway.request("/orders", RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: impl Display) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/orders", id), RequestOptions::get())
            .await
    }

    /// Places an order (shipping details and the like).
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> ClientResult<Value> {
        self.gateway
            .request("/orders", RequestOptions::post().json_body(data)?)
            .await
    }

    /// `PUT /orders/{id}/status`. Admin only on the backend.
    pub async fn update_status(&self, id: impl Display, status: &str) -> ClientResult<Value> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        self.gateway
            .request(
                &format!("{}/status", item_path("/orders", id)),
                RequestOptions::put().json_body(&body)?,
            )
            .await
    }

    /// Cancels an order. The backend decides whether it still can be.
    pub async fn cancel(&self, id: impl Display) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/orders", id), RequestOptions::delete())
            .await
    }
}
