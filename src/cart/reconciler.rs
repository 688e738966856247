//! Cart quantity and removal reconciliation against the server.
//!
//! The server owns the cart. [`CartReconciler`] sends each change, then
//! replaces its whole snapshot with a fresh copy; nothing is computed
//! optimistically.
//!
//! Each line carries an [`ItemState`]:
//!
//! ```text
//! Idle ──change──> Updating ──ok──> Idle
//!                     └────error──> Failed(message)   (quantity unchanged)
//! ```
//!
//! A second change for a line that is already `Updating` is ignored rather
//! than interleaved.
//!
//! # Thread Safety
//!
//! [`CartReconciler`] is `Send + Sync` and cheap to clone. Its state lock is
//! never held across a network call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::api::CartBackend;
use crate::cart::model::CartSnapshot;
use crate::error::StorefrontError;

/// Lowest quantity a cart line may hold.
pub const MIN_QUANTITY: u32 = 1;

/// The user's answer to a destructive-action prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// The user confirmed.
    Confirmed,
    /// The user cancelled.
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Request state of one cart line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemState {
    /// No request in flight.
    #[default]
    Idle,
    /// A change was sent and has not completed.
    Updating,
    /// The last change failed; the displayed quantity is the previous one.
    Failed(String),
}

/// Why a change was not sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The requested quantity is below one.
    BelowMinimum,
    /// The requested quantity exceeds the product's stock.
    AboveStock,
    /// No line with that id is in the current snapshot.
    UnknownItem,
    /// A change for the same line is still in flight.
    InFlight,
    /// The requested quantity equals the current one.
    Unchanged,
}

/// Result of a cart action that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartOutcome {
    /// The change was sent and the snapshot refreshed.
    Applied,
    /// Nothing was sent.
    Ignored(IgnoredReason),
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

/// Which quantity controls are enabled for a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityControls {
    pub can_increment: bool,
    pub can_decrement: bool,
    pub can_remove: bool,
}

#[derive(Debug, Default)]
struct CartState {
    snapshot: CartSnapshot,
    items: HashMap<u64, ItemState>,
    notice: Option<String>,
}

impl CartState {
    fn replace(&mut self, snapshot: CartSnapshot) {
        self.items
            .retain(|id, _| snapshot.items.iter().any(|item| item.id == *id));
        self.snapshot = snapshot;
    }

    fn is_updating(&self, item_id: u64) -> bool {
        matches!(self.items.get(&item_id), Some(ItemState::Updating))
    }
}

struct ReconcilerInner {
    backend: Arc<dyn CartBackend>,
    state: Mutex<CartState>,
}

/// Keeps a cart snapshot in step with the server.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use boutique_storefront::cart::{CartApi, CartOutcome, CartReconciler, Confirmation};
///
/// let cart = CartReconciler::new(Arc::new(CartApi::new(rest)));
/// cart.refresh().await?;
///
/// // Zero is below the minimum, so nothing is sent
/// assert!(matches!(cart.change_quantity(42, 0).await?, CartOutcome::Ignored(_)));
///
/// cart.remove_item(42, Confirmation::Confirmed).await?;
/// ```
#[derive(Clone)]
pub struct CartReconciler {
    inner: Arc<ReconcilerInner>,
}

// Verify CartReconciler is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CartReconciler>();
};

impl std::fmt::Debug for CartReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartReconciler")
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl CartReconciler {
    /// Creates a reconciler with an empty snapshot. Call
    /// [`refresh`](Self::refresh) to load the cart.
    #[must_use]
    pub fn new(backend: Arc<dyn CartBackend>) -> Self {
        Self {
            inner: Arc::new(ReconcilerInner {
                backend,
                state: Mutex::new(CartState::default()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, CartState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.state().snapshot.clone()
    }

    /// Returns the request state of a line.
    #[must_use]
    pub fn item_state(&self, item_id: u64) -> ItemState {
        self.state()
            .items
            .get(&item_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the pending failure notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        self.state().notice.clone()
    }

    /// Dismisses the failure notice.
    pub fn clear_notice(&self) {
        self.state().notice = None;
    }

    /// Returns which controls are enabled for a line, or `None` if it is not
    /// in the cart.
    #[must_use]
    pub fn controls(&self, item_id: u64) -> Option<QuantityControls> {
        let state = self.state();
        let item = state.snapshot.item(item_id)?;
        let idle = !state.is_updating(item_id);
        Some(QuantityControls {
            can_increment: idle && item.quantity < item.stock(),
            can_decrement: idle && item.quantity > MIN_QUANTITY,
            can_remove: idle,
        })
    }

    /// Reloads the snapshot from the server.
    ///
    /// # Errors
    ///
    /// Returns the request error; the previous snapshot is kept and a notice set.
    pub async fn refresh(&self) -> Result<(), StorefrontError> {
        match self.inner.backend.fetch_cart().await {
            Ok(snapshot) => {
                let mut state = self.state();
                state.replace(snapshot);
                state.notice = None;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(error = %error, "Failed to load cart");
                self.state().notice = Some(error.notice());
                Err(error)
            }
        }
    }

    /// Sets a line's quantity.
    ///
    /// Quantities below one are ignored, as is a change for a line that is
    /// already updating. Raising a line above the product's stock is ignored,
    /// but a line left above stock by a server-side stock change can always
    /// be lowered.
    ///
    /// # Errors
    ///
    /// Returns the request error. The line is marked
    /// [`ItemState::Failed`] and keeps its previous quantity.
    pub async fn change_quantity(
        &self,
        item_id: u64,
        quantity: u32,
    ) -> Result<CartOutcome, StorefrontError> {
        if quantity < MIN_QUANTITY {
            return Ok(CartOutcome::Ignored(IgnoredReason::BelowMinimum));
        }

        {
            let mut state = self.state();
            let Some(item) = state.snapshot.item(item_id) else {
                return Ok(CartOutcome::Ignored(IgnoredReason::UnknownItem));
            };
            if quantity > item.stock() && quantity > item.quantity {
                return Ok(CartOutcome::Ignored(IgnoredReason::AboveStock));
            }
            if quantity == item.quantity {
                return Ok(CartOutcome::Ignored(IgnoredReason::Unchanged));
            }
            if state.is_updating(item_id) {
                tracing::debug!(item_id, "Ignoring quantity change while update is in flight");
                return Ok(CartOutcome::Ignored(IgnoredReason::InFlight));
            }
            state.items.insert(item_id, ItemState::Updating);
        }

        tracing::debug!(item_id, quantity, "Updating cart quantity");
        let result = self.inner.backend.update_quantity(item_id, quantity).await;
        self.settle(item_id, result).await
    }

    /// Adds one unit to a line.
    ///
    /// # Errors
    ///
    /// See [`change_quantity`](Self::change_quantity).
    pub async fn increment(&self, item_id: u64) -> Result<CartOutcome, StorefrontError> {
        let Some(current) = self.quantity_of(item_id) else {
            return Ok(CartOutcome::Ignored(IgnoredReason::UnknownItem));
        };
        self.change_quantity(item_id, current.saturating_add(1)).await
    }

    /// Takes one unit from a line. A line at one unit stays at one.
    ///
    /// # Errors
    ///
    /// See [`change_quantity`](Self::change_quantity).
    pub async fn decrement(&self, item_id: u64) -> Result<CartOutcome, StorefrontError> {
        let Some(current) = self.quantity_of(item_id) else {
            return Ok(CartOutcome::Ignored(IgnoredReason::UnknownItem));
        };
        self.change_quantity(item_id, current.saturating_sub(1)).await
    }

    /// Removes a line after explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns the request error. The line is marked [`ItemState::Failed`]
    /// and stays in the cart.
    pub async fn remove_item(
        &self,
        item_id: u64,
        confirmation: Confirmation,
    ) -> Result<CartOutcome, StorefrontError> {
        if confirmation == Confirmation::Declined {
            return Ok(CartOutcome::Declined);
        }

        {
            let mut state = self.state();
            if state.snapshot.item(item_id).is_none() {
                return Ok(CartOutcome::Ignored(IgnoredReason::UnknownItem));
            }
            if state.is_updating(item_id) {
                return Ok(CartOutcome::Ignored(IgnoredReason::InFlight));
            }
            state.items.insert(item_id, ItemState::Updating);
        }

        tracing::debug!(item_id, "Removing cart item");
        let result = self.inner.backend.remove_item(item_id).await;
        self.settle(item_id, result).await
    }

    /// Adds a product to the cart and reloads the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the request error and sets a notice.
    pub async fn add_to_cart(
        &self,
        product_id: u64,
        quantity: u32,
    ) -> Result<CartOutcome, StorefrontError> {
        if quantity < MIN_QUANTITY {
            return Ok(CartOutcome::Ignored(IgnoredReason::BelowMinimum));
        }

        tracing::debug!(product_id, quantity, "Adding to cart");
        if let Err(error) = self.inner.backend.add_item(product_id, quantity).await {
            tracing::warn!(product_id, error = %error, "Failed to add to cart");
            self.state().notice = Some(error.notice());
            return Err(error);
        }
        self.refresh().await?;
        Ok(CartOutcome::Applied)
    }

    /// Empties the cart after explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns the request error and sets a notice.
    pub async fn clear(&self, confirmation: Confirmation) -> Result<CartOutcome, StorefrontError> {
        if confirmation == Confirmation::Declined {
            return Ok(CartOutcome::Declined);
        }

        if let Err(error) = self.inner.backend.clear().await {
            tracing::warn!(error = %error, "Failed to clear cart");
            self.state().notice = Some(error.notice());
            return Err(error);
        }
        self.refresh().await?;
        Ok(CartOutcome::Applied)
    }

    fn quantity_of(&self, item_id: u64) -> Option<u32> {
        self.state().snapshot.item(item_id).map(|item| item.quantity)
    }

    async fn settle(
        &self,
        item_id: u64,
        result: Result<(), StorefrontError>,
    ) -> Result<CartOutcome, StorefrontError> {
        if let Err(error) = result {
            tracing::warn!(item_id, error = %error, "Cart update failed");
            let mut state = self.state();
            state.items.insert(item_id, ItemState::Failed(error.notice()));
            state.notice = Some(error.notice());
            return Err(error);
        }

        match self.inner.backend.fetch_cart().await {
            Ok(snapshot) => {
                let mut state = self.state();
                state.items.insert(item_id, ItemState::Idle);
                state.replace(snapshot);
                state.notice = None;
                Ok(CartOutcome::Applied)
            }
            Err(error) => {
                tracing::warn!(item_id, error = %error, "Failed to reload cart after update");
                let mut state = self.state();
                state.items.insert(item_id, ItemState::Failed(error.notice()));
                state.notice = Some(error.notice());
                Err(error)
            }
        }
    }
}
