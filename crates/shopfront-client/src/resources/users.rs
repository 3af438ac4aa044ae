//! User administration endpoints. Admin only on the backend.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use super::item_path;
use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};

#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> UsersApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        UsersApi { gateway }
    }

    pub async fn get_all(&self) -> ClientResult<Value> {
        self.gateway.request("/users", RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: impl Display) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/users", id), RequestOptions::get())
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: impl Display,
        data: &T,
    ) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/users", id), RequestOptions::put().json_body(data)?)
            .await
    }

    pub async fn delete(&self, id: impl Display) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/users", id), RequestOptions::delete())
            .await
    }
}
