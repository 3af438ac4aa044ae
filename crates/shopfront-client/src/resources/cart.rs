//! Shopping cart endpoints. All require a signed-in session on the backend.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use shopfront_core::QuantityUpdate;

use super::item_path;
use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};

#[derive(Debug, Clone, Copy)]
pub struct CartApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> CartApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        CartApi { gateway }
    }

    pub async fn get(&self) -> ClientResult<Value> {
        self.gateway.request("/cart", RequestOptions::get()).await
    }

    /// `POST /cart`, typically with a [`shopfront_core::CartItemRequest`].
    pub async fn add<T: Serialize + ?Sized>(&self, item: &T) -> ClientResult<Value> {
        self.gateway
            .request("/cart", RequestOptions::post().json_body(item)?)
            .await
    }

    /// `PUT /cart/{productId}` with `{"quantity": n}`.
    pub async fn update(&self, product_id: impl Display, quantity: i64) -> ClientResult<Value> {
        self.gateway
            .request(
                &item_path("/cart", product_id),
                RequestOptions::put().json_body(&QuantityUpdate { quantity })?,
            )
            .await
    }

    pub async fn remove(&self, product_id: impl Display) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/cart", product_id), RequestOptions::delete())
            .await
    }

    /// Empties the whole cart.
    pub async fn clear(&self) -> ClientResult<Value> {
        self.gateway.request("/cart", RequestOptions::delete()).await
    }
}
