//! Bearer token type for session authentication.
//!
//! The backend issues a JWT on login. The client treats it as an opaque
//! bearer credential and attaches it as `Authorization: Bearer <token>`.
//!
//! # Security
//!
//! [`BearerToken`] implements a custom [`Debug`] that masks the value so the
//! credential never ends up in logs.
//!
//! # Example
//!
//! ```rust
//! use boutique_storefront::auth::BearerToken;
//!
//! let token = BearerToken::new("eyJhbGciOi...");
//! assert_eq!(token.header_value(), "Bearer eyJhbGciOi...");
//! assert_eq!(format!("{:?}", token), "BearerToken(*****)");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP header carrying the session credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// An opaque session credential issued by `/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the token is empty and must not be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value_uses_bearer_scheme() {
        let token = BearerToken::new("abc.def.ghi");
        assert_eq!(token.header_value(), "Bearer abc.def.ghi");
    }

    #[test]
    fn test_debug_masks_token_value() {
        let token = BearerToken::new("super-secret-jwt");
        let debug_output = format!("{:?}", token);

        assert_eq!(debug_output, "BearerToken(*****)");
        assert!(!debug_output.contains("super-secret-jwt"));
    }

    #[test]
    fn test_blank_token_is_empty() {
        assert!(BearerToken::new("  ").is_empty());
        assert!(!BearerToken::new("t").is_empty());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&BearerToken::new("t0k")).unwrap();
        assert_eq!(json, r#""t0k""#);
    }
}
