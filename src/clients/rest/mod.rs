//! REST API client for the boutique backend.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! - [`RestClient`]: `get()`, `post()`, `put()`, `delete()` and typed `*_json` variants
//! - [`RestError`]: Error type for REST API operations
//!
//! # Path Normalization
//!
//! Leading and trailing slashes are stripped (`/cart/` -> `cart`) and the
//! result is joined onto the configured base URL. Empty paths are rejected.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
