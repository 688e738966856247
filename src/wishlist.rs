//! The signed-in customer's wishlist.
//!
//! Every mutation is followed by a reload, so [`WishlistClient::entries`]
//! always reflects the server after the last successful call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::cart::Confirmation;
use crate::catalog::Product;
use crate::clients::RestClient;
use crate::error::StorefrontError;
use crate::serde_helpers::optional_timestamp;

/// One saved product.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: u64,
    pub product: Product,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub date_added: Option<DateTime<Utc>>,
}

/// Client for the `/wishlist` endpoints with a cached copy of the list.
#[derive(Debug)]
pub struct WishlistClient {
    rest: Arc<RestClient>,
    entries: Mutex<Vec<WishlistEntry>>,
}

impl WishlistClient {
    /// Creates a wishlist client with an empty cache.
    #[must_use]
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self {
            rest,
            entries: Mutex::new(Vec::new()),
        }
    }

    fn cache(&self) -> MutexGuard<'_, Vec<WishlistEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reloads the wishlist from the server and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::AuthRequired`] when signed out, or
    /// [`StorefrontError::Rest`] if the request fails. The cache is kept.
    pub async fn list(&self) -> Result<Vec<WishlistEntry>, StorefrontError> {
        let entries: Vec<WishlistEntry> = self.rest.get_json("wishlist", None).await?;
        tracing::debug!(count = entries.len(), "Loaded wishlist");
        self.cache().clone_from(&entries);
        Ok(entries)
    }

    /// Saves a product and reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the request error; the cache is kept.
    pub async fn add(&self, product_id: u64) -> Result<Vec<WishlistEntry>, StorefrontError> {
        self.rest
            .post(&format!("wishlist/add/{product_id}"), None, None)
            .await?;
        self.list().await
    }

    /// Removes a product after explicit confirmation and reloads the list.
    ///
    /// A declined confirmation returns the cached list without a request.
    ///
    /// # Errors
    ///
    /// Returns the request error; the cache is kept.
    pub async fn remove(
        &self,
        product_id: u64,
        confirmation: Confirmation,
    ) -> Result<Vec<WishlistEntry>, StorefrontError> {
        if confirmation == Confirmation::Declined {
            return Ok(self.entries());
        }

        self.rest
            .delete(&format!("wishlist/remove/{product_id}"), None)
            .await?;
        self.list().await
    }

    /// Returns `true` if the cached list holds the product.
    #[must_use]
    pub fn contains(&self, product_id: u64) -> bool {
        self.cache()
            .iter()
            .any(|entry| entry.product.id == product_id)
    }

    /// Returns the cached list.
    #[must_use]
    pub fn entries(&self) -> Vec<WishlistEntry> {
        self.cache().clone()
    }
}
