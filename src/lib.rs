//! # Boutique Storefront Client
//!
//! A headless client for a boutique clothing store's REST backend: the
//! filterable product catalog, the shopping cart, customer accounts, the
//! wishlist and the newsletter.
//!
//! ## Overview
//!
//! This crate provides:
//! - Configuration via [`StorefrontConfig`] and [`StorefrontConfigBuilder`]
//! - An explicitly passed [`SessionContext`] holding the bearer token
//! - [`FilterState`] and [`UrlSync`] for the catalog query and its query string
//! - [`CatalogFetcher`], which applies only the newest product list response
//! - [`CartReconciler`], which edits the server-owned cart one line at a time
//! - Account, wishlist, customer profile and newsletter clients
//!
//! ## Quick Start
//!
//! ```rust
//! use boutique_storefront::{ApiBaseUrl, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .base_url(ApiBaseUrl::new("http://localhost:8080/api").unwrap())
//!     .build();
//! assert_eq!(config.base_url().as_ref(), "http://localhost:8080/api");
//! ```
//!
//! ## Catalog Filtering
//!
//! The filter is an immutable value; every change produces a new one and the
//! query string is derived from it:
//!
//! ```rust
//! use boutique_storefront::catalog::{FilterField, UrlSync};
//!
//! let sync = UrlSync::from_query("?category=Sarees");
//! sync.set_filter(FilterField::Status, "onSale").unwrap();
//! assert_eq!(sync.query_string(), "category=Sarees&status=onSale");
//!
//! sync.clear_all();
//! assert!(!sync.state().has_active_filters());
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use boutique_storefront::{SessionContext, Storefront, StorefrontConfig};
//! use boutique_storefront::cart::Confirmation;
//!
//! let store = Storefront::new(&StorefrontConfig::default(), SessionContext::in_memory());
//! store.account().login("meera@example.com", "Saree@2024").await?;
//!
//! store.cart().refresh().await?;
//! store.cart().change_quantity(42, 2).await?;
//! store.cart().remove_item(42, Confirmation::Confirmed).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and session are passed explicitly
//! - **Server-owned data**: The cart is re-read after every change, never patched locally
//! - **Latest wins**: A slow response for an old filter never replaces a newer list
//! - **No implicit navigation**: A 401 clears the session and surfaces
//!   [`StorefrontError::AuthRequired`]
//! - **Thread-safe**: All service handles are `Send + Sync`

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod customer;
pub mod error;
pub mod newsletter;
mod serde_helpers;
mod storefront;
pub mod validation;
pub mod wishlist;

// Re-export public types at crate root for convenience
pub use auth::{AccountClient, BearerToken, MemoryTokenStore, SessionContext, TokenStore, UserSummary};
pub use config::{ApiBaseUrl, EmailAddress, OtpCode, StorefrontConfig, StorefrontConfigBuilder};
pub use error::{ConfigError, StorefrontError};
pub use storefront::Storefront;
pub use validation::ValidationErrors;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, RestClient, RestError,
};

// Re-export the catalog and cart types most callers need
pub use cart::{CartOutcome, CartReconciler, CartSnapshot, Confirmation};
pub use catalog::{CatalogFetcher, FilterField, FilterState, Product, ProductApi, UrlSync};
pub use customer::{CustomerClient, CustomerProfile};
pub use newsletter::NewsletterClient;
pub use wishlist::{WishlistClient, WishlistEntry};
