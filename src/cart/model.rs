//! Cart line items and the server-owned cart snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::serde_helpers::optional_timestamp;

/// One line of the cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u64,
    pub product: Product,
    pub quantity: u32,
    #[serde(default, deserialize_with = "optional_timestamp", skip_serializing)]
    pub date_added: Option<DateTime<Utc>>,
}

impl CartItem {
    /// Quantity times the product's effective unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.effective_price() * Decimal::from(self.quantity)
    }

    /// Units of the product in stock, the upper bound for `quantity`.
    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.product.stock_quantity
    }
}

/// The cart as returned by `GET /cart`.
///
/// Never edited locally; every mutation is followed by a fresh copy from
/// the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: Decimal,
    /// Number of lines, not units.
    #[serde(default)]
    pub item_count: u32,
}

impl CartSnapshot {
    /// Looks up a line by cart item id.
    #[must_use]
    pub fn item(&self, id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
