//! Product catalog: the filter query, its address-bar mirror, and fetching.
//!
//! # Overview
//!
//! - [`FilterState`]: The current catalog query, replaced wholesale on change
//! - [`UrlSync`]: Publishes each new [`FilterState`] and derives the query string
//! - [`CatalogFetcher`]: Requests product lists and applies only the newest answer
//! - [`ProductApi`]: The `/products` endpoints
//! - [`Product`], [`ProductDetail`], [`Review`]: Read-only catalog models
//! - [`StarRating`], [`SaleBadge`]: Display helpers for product cards
//!
//! # Data Flow
//!
//! ```text
//! set_filter ──> UrlSync ──watch──> CatalogFetcher ──> GET /products
//!                   │                     │
//!              query string        latest-wins view
//! ```

mod api;
mod fetcher;
mod filter;
mod product;
mod rating;
mod url_sync;

pub use api::{CatalogSource, ProductApi};
pub use fetcher::{CatalogFetcher, CatalogView, FetchOutcome};
pub use filter::{FilterField, FilterState, SortBy, StockStatus};
pub use product::{
    Product, ProductDetail, Review, SaleBadge, CLEARANCE_THRESHOLD, LOW_STOCK_THRESHOLD,
};
pub use rating::{StarRating, MAX_STARS};
pub use url_sync::UrlSync;
