//! Shopping cart: the server-owned snapshot and the reconciler that edits it.
//!
//! - [`CartReconciler`]: Sends quantity changes and removals, then reloads
//! - [`CartBackend`]: The server operations, implemented by [`CartApi`]
//! - [`CartSnapshot`], [`CartItem`]: The cart as last read from the server

mod api;
mod model;
mod reconciler;

pub use api::{CartApi, CartBackend};
pub use model::{CartItem, CartSnapshot};
pub use reconciler::{
    CartOutcome, CartReconciler, Confirmation, IgnoredReason, ItemState, QuantityControls,
    MIN_QUANTITY,
};
