//! Cart endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cart::model::CartSnapshot;
use crate::clients::RestClient;
use crate::error::StorefrontError;

/// Server-side cart operations used by the [`CartReconciler`](crate::cart::CartReconciler).
///
/// Mutations return nothing; the reconciler always re-reads the cart
/// afterwards.
#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Reads the whole cart.
    async fn fetch_cart(&self) -> Result<CartSnapshot, StorefrontError>;

    /// Adds `quantity` units of a product.
    async fn add_item(&self, product_id: u64, quantity: u32) -> Result<(), StorefrontError>;

    /// Sets the quantity of one line.
    async fn update_quantity(&self, item_id: u64, quantity: u32) -> Result<(), StorefrontError>;

    /// Removes one line.
    async fn remove_item(&self, item_id: u64) -> Result<(), StorefrontError>;

    /// Removes every line.
    async fn clear(&self) -> Result<(), StorefrontError>;
}

/// Client for the `/cart` endpoints. Every call requires a signed-in session.
#[derive(Clone, Debug)]
pub struct CartApi {
    rest: Arc<RestClient>,
}

impl CartApi {
    /// Creates a cart client over a shared REST client.
    #[must_use]
    pub const fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }
}

fn quantity_query(quantity: u32) -> Vec<(String, String)> {
    vec![("quantity".to_string(), quantity.to_string())]
}

#[async_trait]
impl CartBackend for CartApi {
    async fn fetch_cart(&self) -> Result<CartSnapshot, StorefrontError> {
        Ok(self.rest.get_json("cart", None).await?)
    }

    async fn add_item(&self, product_id: u64, quantity: u32) -> Result<(), StorefrontError> {
        self.rest
            .post(
                &format!("cart/add/{product_id}"),
                None,
                Some(quantity_query(quantity)),
            )
            .await?;
        Ok(())
    }

    async fn update_quantity(&self, item_id: u64, quantity: u32) -> Result<(), StorefrontError> {
        self.rest
            .put(
                &format!("cart/update/{item_id}"),
                None,
                Some(quantity_query(quantity)),
            )
            .await?;
        Ok(())
    }

    async fn remove_item(&self, item_id: u64) -> Result<(), StorefrontError> {
        self.rest
            .delete(&format!("cart/remove/{item_id}"), None)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorefrontError> {
        self.rest.delete("cart/clear", None).await?;
        Ok(())
    }
}
