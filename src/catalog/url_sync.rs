//! Keeps the address bar and the catalog query in step.

use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::catalog::filter::{FilterField, FilterState};
use crate::validation::ValidationErrors;

/// Owner of the current [`FilterState`].
///
/// Every successful mutation publishes exactly one new state on a
/// [`watch`] channel; the query string is always derived from the
/// published state, so the two cannot disagree. Mutations that leave the
/// state unchanged publish nothing.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::catalog::{FilterField, UrlSync};
///
/// let sync = UrlSync::from_query("?category=Sarees");
/// let mut rx = sync.subscribe();
///
/// sync.set_filter(FilterField::Color, "Red").unwrap();
/// assert!(rx.has_changed().unwrap());
/// assert_eq!(sync.query_string(), "category=Sarees&color=Red");
/// ```
#[derive(Debug)]
pub struct UrlSync {
    sender: watch::Sender<FilterState>,
}

impl UrlSync {
    /// Starts from the default state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(FilterState::default())
    }

    /// Starts from an existing state.
    #[must_use]
    pub fn with_state(state: FilterState) -> Self {
        let (sender, _) = watch::channel(state);
        Self { sender }
    }

    /// Starts from the query string of the current address.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::with_state(FilterState::parse_query_params(query))
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> FilterState {
        self.sender.borrow().clone()
    }

    /// Returns the query string reflecting the current state, without `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.sender.borrow().to_query_string()
    }

    /// Returns a receiver that observes every published state.
    ///
    /// The current state counts as already seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.sender.subscribe()
    }

    /// Replaces one field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] and publishes nothing if the value is invalid.
    pub fn set_filter(&self, field: FilterField, value: &str) -> Result<FilterState, ValidationErrors> {
        let next = self.state().set_filter(field, value)?;
        self.publish(next.clone());
        Ok(next)
    }

    /// Replaces both price bounds in one publication.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] and publishes nothing if the range is invalid.
    pub fn set_price_range(
        &self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Result<FilterState, ValidationErrors> {
        let next = self.state().set_price_range(min, max)?;
        self.publish(next.clone());
        Ok(next)
    }

    /// Resets every field and empties the query string.
    pub fn clear_all(&self) -> FilterState {
        let next = FilterState::clear_all();
        self.publish(next.clone());
        next
    }

    /// Applies an address change from outside, such as back navigation.
    pub fn navigate(&self, query: &str) -> FilterState {
        let next = FilterState::parse_query_params(query);
        self.publish(next.clone());
        next
    }

    fn publish(&self, next: FilterState) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            tracing::debug!(query = %self.query_string(), "Filter state changed");
        }
    }
}

impl Default for UrlSync {
    fn default() -> Self {
        Self::new()
    }
}
