//! The catalog query: category, sort order, price bounds, stock status,
//! color and keyword.
//!
//! [`FilterState`] is an immutable value. Every mutation returns a new state
//! so observers never see a half-applied update. The query-string mapping
//! lives here too, because the address bar is just another rendering of the
//! same value.
//!
//! # Example
//!
//! ```rust
//! use boutique_storefront::catalog::{FilterField, FilterState};
//!
//! let state = FilterState::default()
//!     .set_filter(FilterField::Category, "Sarees")
//!     .unwrap()
//!     .set_filter(FilterField::Color, "Red")
//!     .unwrap();
//!
//! let query = state.to_query_string();
//! assert_eq!(query, "category=Sarees&color=Red");
//! assert_eq!(FilterState::parse_query_params(&query), state);
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use url::form_urlencoded;

use crate::validation::ValidationErrors;

/// Sort order understood by `GET /products`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortBy {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortBy {
    /// All sort orders in menu order.
    pub const ALL: [Self; 4] = [Self::Latest, Self::Oldest, Self::PriceAsc, Self::PriceDesc];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::PriceAsc => "priceAsc",
            Self::PriceDesc => "priceDesc",
        }
    }

    /// Returns the menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Latest => "Latest Arrivals",
            Self::Oldest => "Oldest First",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == s).ok_or(())
    }
}

/// Stock and price status filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StockStatus {
    /// Stock above zero.
    InStock,
    /// Between one and five units left.
    LowStock,
    /// Any discount.
    OnSale,
    /// Discount of 50% or more.
    Clearance,
}

impl StockStatus {
    /// All statuses in menu order.
    pub const ALL: [Self; 4] = [Self::InStock, Self::LowStock, Self::OnSale, Self::Clearance];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "inStock",
            Self::LowStock => "lowStock",
            Self::OnSale => "onSale",
            Self::Clearance => "clearance",
        }
    }

    /// Returns the menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OnSale => "On Sale",
            Self::Clearance => "Clearance (50%+ off)",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|status| status.as_str() == s).ok_or(())
    }
}

/// A single field of [`FilterState`], named by its query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// `category`
    Category,
    /// `sortBy`
    SortBy,
    /// `minPrice`
    MinPrice,
    /// `maxPrice`
    MaxPrice,
    /// `status`
    Status,
    /// `color`
    Color,
    /// `keyword`
    Keyword,
}

impl FilterField {
    /// All fields in the order they appear in the query string.
    pub const ALL: [Self; 7] = [
        Self::Category,
        Self::SortBy,
        Self::MinPrice,
        Self::MaxPrice,
        Self::Status,
        Self::Color,
        Self::Keyword,
    ];

    /// Returns the query parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::SortBy => "sortBy",
            Self::MinPrice => "minPrice",
            Self::MaxPrice => "maxPrice",
            Self::Status => "status",
            Self::Color => "color",
            Self::Keyword => "keyword",
        }
    }

    /// Looks up a field by query parameter name.
    #[must_use]
    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current catalog query.
///
/// Empty strings and `None` mean "no constraint". When both price bounds are
/// present, `min_price <= max_price` always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    category: String,
    sort_by: SortBy,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    status: Option<StockStatus>,
    color: String,
    keyword: String,
}

impl FilterState {
    /// Returns the category, empty for all categories.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the sort order.
    #[must_use]
    pub const fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Returns the lower price bound.
    #[must_use]
    pub const fn min_price(&self) -> Option<Decimal> {
        self.min_price
    }

    /// Returns the upper price bound.
    #[must_use]
    pub const fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<StockStatus> {
        self.status
    }

    /// Returns the color, empty for any color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the search keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns a copy with `field` replaced by `value`; an empty value clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] keyed by the parameter name if the value
    /// cannot be parsed, a price is negative, or the price bounds would cross.
    pub fn set_filter(&self, field: FilterField, value: &str) -> Result<Self, ValidationErrors> {
        let value = value.trim();
        let mut next = self.clone();

        match field {
            FilterField::Category => next.category = value.to_string(),
            FilterField::Color => next.color = value.to_string(),
            FilterField::Keyword => next.keyword = value.to_string(),
            FilterField::SortBy => {
                next.sort_by = if value.is_empty() {
                    SortBy::default()
                } else {
                    value.parse().map_err(|()| {
                        ValidationErrors::single(field.as_str(), "Unknown sort order")
                    })?
                };
            }
            FilterField::Status => {
                next.status = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|()| {
                        ValidationErrors::single(field.as_str(), "Unknown status filter")
                    })?)
                };
            }
            FilterField::MinPrice => next.min_price = parse_price(field, value)?,
            FilterField::MaxPrice => next.max_price = parse_price(field, value)?,
        }

        next.check_price_order()?;
        Ok(next)
    }

    /// Returns a copy with both price bounds replaced in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if a bound is negative or `min > max`.
    pub fn set_price_range(
        &self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if min.is_some_and(|m| m.is_sign_negative()) {
            errors.add(FilterField::MinPrice.as_str(), "Price cannot be negative");
        }
        if max.is_some_and(|m| m.is_sign_negative()) {
            errors.add(FilterField::MaxPrice.as_str(), "Price cannot be negative");
        }
        errors.into_result()?;

        let next = Self {
            min_price: min,
            max_price: max,
            ..self.clone()
        };
        next.check_price_order()?;
        Ok(next)
    }

    /// Returns the default state: every constraint removed, newest first.
    #[must_use]
    pub fn clear_all() -> Self {
        Self::default()
    }

    /// Returns `true` if any narrowing filter is set.
    ///
    /// Sort order and keyword are not narrowing filters here.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.category.is_empty()
            || self.status.is_some()
            || !self.color.is_empty()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    /// Returns `(name, value)` pairs for every non-empty field, in a fixed order.
    ///
    /// The default sort order is omitted, so the default state encodes to an
    /// empty query and the backend falls back to newest first.
    #[must_use]
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |field: FilterField, value: String| {
            if !value.is_empty() {
                params.push((field.as_str().to_string(), value));
            }
        };

        push(FilterField::Category, self.category.clone());
        if self.sort_by != SortBy::default() {
            push(FilterField::SortBy, self.sort_by.as_str().to_string());
        }
        push(FilterField::MinPrice, format_price(self.min_price));
        push(FilterField::MaxPrice, format_price(self.max_price));
        push(
            FilterField::Status,
            self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
        );
        push(FilterField::Color, self.color.clone());
        push(FilterField::Keyword, self.keyword.clone());

        params
    }

    /// Encodes [`to_query_params`](Self::to_query_params) as a query string
    /// without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_params())
            .finish()
    }

    /// Parses a query string (with or without a leading `?`).
    ///
    /// Unknown keys are ignored. Values that cannot be parsed fall back to
    /// the field's default, and crossed price bounds are both dropped.
    #[must_use]
    pub fn parse_query_params(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let Some(field) = FilterField::from_param(&key) else {
                continue;
            };
            let value = value.trim();
            match field {
                FilterField::Category => state.category = value.to_string(),
                FilterField::Color => state.color = value.to_string(),
                FilterField::Keyword => state.keyword = value.to_string(),
                FilterField::SortBy => state.sort_by = value.parse().unwrap_or_default(),
                FilterField::Status => state.status = value.parse().ok(),
                FilterField::MinPrice => state.min_price = parse_price(field, value).ok().flatten(),
                FilterField::MaxPrice => state.max_price = parse_price(field, value).ok().flatten(),
            }
        }

        if state.check_price_order().is_err() {
            tracing::debug!("Ignoring crossed price bounds from query string");
            state.min_price = None;
            state.max_price = None;
        }

        state
    }

    fn check_price_order(&self) -> Result<(), ValidationErrors> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => Err(ValidationErrors::single(
                FilterField::MinPrice.as_str(),
                "Minimum price cannot exceed maximum price",
            )),
            _ => Ok(()),
        }
    }
}

fn parse_price(field: FilterField, value: &str) -> Result<Option<Decimal>, ValidationErrors> {
    if value.is_empty() {
        return Ok(None);
    }
    let price = Decimal::from_str(value)
        .map_err(|_| ValidationErrors::single(field.as_str(), "Enter a valid price"))?;
    if price.is_sign_negative() {
        return Err(ValidationErrors::single(
            field.as_str(),
            "Price cannot be negative",
        ));
    }
    Ok(Some(price))
}

fn format_price(price: Option<Decimal>) -> String {
    price.map(|p| p.normalize().to_string()).unwrap_or_default()
}
