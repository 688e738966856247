//! Read-only product, review and product-detail models.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{comma_list, optional_timestamp, serialize_comma_list};

/// Discount at or above which a product counts as clearance.
pub const CLEARANCE_THRESHOLD: u8 = 50;

/// Stock at or below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A catalog product as served by `GET /products`.
///
/// The backend also sends a computed `discountedPrice`; it is ignored in
/// favor of [`effective_price`](Self::effective_price) so the rounding is
/// the same everywhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub discount_percent: u8,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub product_color: Option<String>,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub sku: Option<String>,
    /// Size labels in display order.
    #[serde(
        default,
        deserialize_with = "comma_list",
        serialize_with = "serialize_comma_list"
    )]
    pub size_options: Vec<String>,
    #[serde(default)]
    pub size_guide_url: Option<String>,
    /// Free text such as "4-6 business days".
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub delivery_and_return_policy: Option<String>,
    #[serde(default)]
    pub additional_information: Option<String>,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub date_created: Option<DateTime<Utc>>,
}

const fn available_by_default() -> bool {
    true
}

impl Product {
    /// Price after discount, rounded half-up to two decimals.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        let percent = Decimal::from(self.discount_percent.min(100));
        let factor = Decimal::ONE - percent / Decimal::ONE_HUNDRED;
        (self.price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Returns `true` if any discount applies.
    #[must_use]
    pub const fn is_on_sale(&self) -> bool {
        self.discount_percent > 0
    }

    /// Returns `true` for discounts of 50% or more.
    #[must_use]
    pub const fn is_clearance(&self) -> bool {
        self.discount_percent >= CLEARANCE_THRESHOLD
    }

    /// Returns `true` if at least one unit is left.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Returns `true` for one to five units left.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock_quantity > 0 && self.stock_quantity <= LOW_STOCK_THRESHOLD
    }

    /// Returns the badge to show over the product image, if any.
    #[must_use]
    pub const fn sale_badge(&self) -> Option<SaleBadge> {
        SaleBadge::for_discount(self.discount_percent)
    }
}

/// Discount badge shown on product cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SaleBadge {
    /// Discount below 50%.
    Sale(u8),
    /// Discount of 50% or more.
    Clearance(u8),
}

impl SaleBadge {
    /// Returns the badge for a discount percentage; `None` without a discount.
    #[must_use]
    pub const fn for_discount(percent: u8) -> Option<Self> {
        if percent == 0 {
            None
        } else if percent >= CLEARANCE_THRESHOLD {
            Some(Self::Clearance(percent))
        } else {
            Some(Self::Sale(percent))
        }
    }

    /// Returns the discount percentage.
    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::Sale(p) | Self::Clearance(p) => p,
        }
    }
}

impl fmt::Display for SaleBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sale(p) => write!(f, "SALE {p}%"),
            Self::Clearance(p) => write!(f, "CLEARANCE {p}%"),
        }
    }
}

/// An approved customer review.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    /// One to five stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub date_posted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_approved: bool,
}

/// `GET /products/{id}` payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub related_products: Vec<Product>,
}
