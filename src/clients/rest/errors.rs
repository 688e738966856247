//! REST-specific error types for the storefront client.
//!
//! - [`RestError::InvalidPath`]: When a REST API path fails validation
//! - [`RestError::Http`]: Wraps underlying HTTP errors
//! - [`RestError::Deserialize`]: When a successful response has an unexpected shape

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST API operations.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The REST API path is invalid (empty after normalization).
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body did not match the expected type.
    #[error("Unexpected response from {path}: {source}")]
    Deserialize {
        /// The request path.
        path: String,
        /// The underlying serde error.
        source: serde_json::Error,
    },
}

impl RestError {
    /// Returns `true` if the backend rejected the session token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http(HttpError::Unauthorized))
    }
}
