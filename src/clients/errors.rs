//! HTTP-specific error types for the storefront client.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses other than 401
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! A 401 is reported as [`HttpError::Unauthorized`] after the session token
//! has been cleared. No request is ever retried automatically.
//!
//! # Example
//!
//! ```rust,ignore
//! use boutique_storefront::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Unauthorized) => println!("Please log in again"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// `message` is the human-readable text the backend put in its `error` or
/// `message` field, falling back to a generic status line.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Email not found.".to_string(),
/// };
/// assert_eq!(error.to_string(), "Email not found.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message extracted from the response body.
    pub message: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A body was attached to a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method that rejected the body.
        method: String,
    },

    /// A header value contains characters that cannot be sent.
    #[error("Invalid value for header {name}.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code other than 401).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The backend answered 401. The session has been invalidated.
    #[error("Unauthorized: the session is missing or has expired.")]
    Unauthorized,

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code when the backend produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Unauthorized => Some(401),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 400,
            message: "Passwords do not match".to_string(),
        };
        assert_eq!(error.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_invalid_request_error_body_not_allowed() {
        let error = InvalidHttpRequestError::BodyNotAllowed {
            method: "get".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot send a body with get.");
    }

    #[test]
    fn test_status_codes() {
        let response = HttpError::Response(HttpResponseError {
            code: 404,
            message: "missing".to_string(),
        });
        assert_eq!(response.status(), Some(404));
        assert_eq!(HttpError::Unauthorized.status(), Some(401));

        let invalid = HttpError::InvalidRequest(InvalidHttpRequestError::InvalidHeader {
            name: "Authorization".to_string(),
        });
        assert_eq!(invalid.status(), None);
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let http_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
        };
        let _ = http_error;

        let unauthorized: &dyn std::error::Error = &HttpError::Unauthorized;
        let _ = unauthorized;
    }
}
