//! Product endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::filter::FilterState;
use crate::catalog::product::{Product, ProductDetail};
use crate::clients::RestClient;
use crate::error::StorefrontError;

/// Source of product lists for the [`CatalogFetcher`](crate::catalog::CatalogFetcher).
///
/// [`ProductApi`] is the production implementation. The trait exists so the
/// fetcher can be driven by any source, including in-memory fakes.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the products matching `filter`.
    async fn list_products(&self, filter: &FilterState) -> Result<Vec<Product>, StorefrontError>;
}

/// Client for the `/products` endpoints.
#[derive(Clone, Debug)]
pub struct ProductApi {
    rest: Arc<RestClient>,
}

impl ProductApi {
    /// Creates a product client over a shared REST client.
    #[must_use]
    pub const fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Lists products matching `filter`, one query parameter per non-empty field.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the request fails.
    pub async fn list(&self, filter: &FilterState) -> Result<Vec<Product>, StorefrontError> {
        let query = filter.to_query_params();
        tracing::debug!(query = %filter.to_query_string(), "Listing products");
        Ok(self.rest.get_json("products", Some(query)).await?)
    }

    /// Lists the featured products for the home page.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the request fails.
    pub async fn featured(&self) -> Result<Vec<Product>, StorefrontError> {
        Ok(self.rest.get_json("products/featured", None).await?)
    }

    /// Lists the category names used by the category filter.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the request fails.
    pub async fn categories(&self) -> Result<Vec<String>, StorefrontError> {
        Ok(self.rest.get_json("products/categories", None).await?)
    }

    /// Fetches one product with its approved reviews and related products.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the product does not exist or the
    /// request fails.
    pub async fn product_detail(&self, id: u64) -> Result<ProductDetail, StorefrontError> {
        Ok(self.rest.get_json(&format!("products/{id}"), None).await?)
    }
}

#[async_trait]
impl CatalogSource for ProductApi {
    async fn list_products(&self, filter: &FilterState) -> Result<Vec<Product>, StorefrontError> {
        self.list(filter).await
    }
}
