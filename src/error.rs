//! Error types for the boutique storefront client.
//!
//! This module contains the configuration error raised by validated newtypes
//! and the crate-level [`StorefrontError`] returned by the storefront services.
//!
//! # Error Taxonomy
//!
//! Failures fall into three groups, none of which is fatal to the process:
//!
//! - **Validation errors** ([`ValidationErrors`]): detected locally, they block
//!   submission and are never sent to the backend.
//! - **Request errors** ([`RestError`]): network failures and non-2xx responses.
//!   The caller keeps its previous state and shows a transient notice.
//! - **Authentication errors** ([`StorefrontError::AuthRequired`]): a 401 from
//!   the backend. The session has already been invalidated; the top-level
//!   controller decides where to navigate.
//!
//! # Example
//!
//! ```rust
//! use boutique_storefront::{ApiBaseUrl, ConfigError};
//!
//! let result = ApiBaseUrl::new("localhost:8080");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

use crate::clients::rest::RestError;
use crate::clients::HttpError;
use crate::validation::ValidationErrors;

/// Errors that can occur while building the client configuration or
/// validating configuration-like values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme (e.g., 'http://localhost:8080/api').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// An email address is malformed.
    #[error("Invalid email address '{email}'.")]
    InvalidEmail {
        /// The rejected email address.
        email: String,
    },

    /// A one-time password is malformed.
    #[error("Invalid OTP '{otp}'. Expected a numeric code.")]
    InvalidOtp {
        /// The rejected code.
        otp: String,
    },

    /// An environment variable holds a value that cannot be used.
    #[error("Environment variable '{name}' is invalid: {reason}")]
    InvalidEnvVar {
        /// The variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Unified error returned by the storefront services.
///
/// Services never navigate or clear UI state on failure; they hand this value
/// back and let the caller decide.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Client-side validation failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The backend rejected the session token. The session is already cleared.
    #[error("Authentication required. Please log in again.")]
    AuthRequired,

    /// The login credentials were rejected.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The customer has not confirmed their email address yet.
    #[error("Please verify your email before logging in. Check your inbox for the OTP.")]
    EmailNotVerified {
        /// The login name that needs verification.
        username: String,
    },

    /// A request failed at the transport or HTTP level.
    #[error(transparent)]
    Rest(RestError),
}

impl StorefrontError {
    /// Returns the message suitable for a transient banner.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::AuthRequired | Self::InvalidCredentials | Self::EmailNotVerified { .. } => {
                self.to_string()
            }
            Self::Rest(RestError::Http(HttpError::Response(e))) => e.message.clone(),
            Self::Rest(e) => e.to_string(),
        }
    }

    /// Returns `true` if the caller should route the user to the login screen.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}

impl From<RestError> for StorefrontError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(HttpError::Unauthorized) => Self::AuthRequired,
            other => Self::Rest(other),
        }
    }
}

impl From<HttpError> for StorefrontError {
    fn from(error: HttpError) -> Self {
        RestError::from(error).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "nope".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("with scheme"));
    }

    #[test]
    fn test_invalid_otp_error_message() {
        let error = ConfigError::InvalidOtp {
            otp: "12ab".to_string(),
        };
        assert!(error.to_string().contains("numeric code"));
    }

    #[test]
    fn test_unauthorized_maps_to_auth_required() {
        let error: StorefrontError = RestError::Http(HttpError::Unauthorized).into();
        assert!(matches!(error, StorefrontError::AuthRequired));
        assert!(error.requires_login());
    }

    #[test]
    fn test_response_error_notice_is_server_message() {
        let error: StorefrontError = HttpError::Response(HttpResponseError {
            code: 400,
            message: "Current password is incorrect".to_string(),
        })
        .into();

        assert!(!error.requires_login());
        assert_eq!(error.notice(), "Current password is incorrect");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidEmail {
            email: "x".to_string(),
        };
        let _: &dyn std::error::Error = &error;
        let _: &dyn std::error::Error = &StorefrontError::AuthRequired;
    }

    #[test]
    fn test_login_errors_do_not_require_navigation() {
        assert!(!StorefrontError::InvalidCredentials.requires_login());
        let error = StorefrontError::EmailNotVerified {
            username: "meera@example.com".to_string(),
        };
        assert!(error.notice().contains("verify your email"));
    }
}
