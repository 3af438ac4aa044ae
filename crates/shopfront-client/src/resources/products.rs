//! Product catalogue endpoints.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use super::item_path;
use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};

// =============================================================================
// Product Query
// =============================================================================

/// Filters for `GET /products`, encoded in insertion order.
///
/// ```rust
/// use shopfront_client::resources::ProductQuery;
///
/// let query = ProductQuery::new().filter("category", "tea").filter("q", "green leaf");
/// assert_eq!(query.to_query_string(), "category=tea&q=green+leaf");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pairs: Vec<(String, String)>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter. Repeated keys are kept.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded `k=v&k=v` form, empty when there are no filters.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProductQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ProductQuery {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Products Client
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ProductsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ProductsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        ProductsApi { gateway }
    }

    /// `GET /products`, with `?query` only when filters are present.
    pub async fn get_all(&self, filters: &ProductQuery) -> ClientResult<Value> {
        let endpoint = if filters.is_empty() {
            "/products".to_string()
        } else {
            format!("/products?{}", filters.to_query_string())
        };
        self.gateway.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: impl Display) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/products", id), RequestOptions::get())
            .await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> ClientResult<Value> {
        self.gateway
            .request("/products", RequestOptions::post().json_body(data)?)
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: impl Display,
        data: &T,
    ) -> ClientResult<Value> {
        self.gateway
            .request(
                &item_path("/products", id),
                RequestOptions::put().json_body(data)?,
            )
            .await
    }

    pub async fn delete(&self, id: impl Display) -> ClientResult<Value> {
        self.gateway
            .request(&item_path("/products", id), RequestOptions::delete())
            .await
    }
}
