//! Validated newtype wrappers for configuration and account values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use crate::validation::is_valid_email;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL for the storefront REST API.
///
/// The URL must carry a scheme and a host. A trailing slash is removed so
/// request paths can be appended uniformly.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::ApiBaseUrl;
///
/// let url = ApiBaseUrl::new("http://localhost:8080/api/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080/api");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), Some("localhost"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiBaseUrl {
    /// The backend address used when nothing else is configured.
    pub const DEFAULT: &'static str = "http://localhost:8080/api";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_start == host_end || url[host_start..].contains(['?', '#']) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Joins a relative API path onto this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl Default for ApiBaseUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 4,
            host_start: 7,
            host_end: 16,
        }
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// A syntactically valid email address, trimmed of surrounding whitespace.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::EmailAddress;
///
/// let email = EmailAddress::new(" priya@example.com ").unwrap();
/// assert_eq!(email.as_ref(), "priya@example.com");
/// assert!(EmailAddress::new("priya@").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a new validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEmail`] if the address is malformed.
    pub fn new(email: impl Into<String>) -> Result<Self, ConfigError> {
        let email = email.into().trim().to_string();
        if !is_valid_email(&email) {
            return Err(ConfigError::InvalidEmail { email });
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A one-time numeric code sent by email for account or email verification.
///
/// The `Debug` implementation masks the code so it never lands in logs.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::OtpCode;
///
/// let otp = OtpCode::new("482913").unwrap();
/// assert_eq!(otp.as_ref(), "482913");
/// assert_eq!(format!("{:?}", otp), "OtpCode(*****)");
/// assert!(OtpCode::new("48a913").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    const MIN_DIGITS: usize = 4;
    const MAX_DIGITS: usize = 8;

    /// Creates a new validated OTP.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOtp`] unless the code is 4 to 8 ASCII digits.
    pub fn new(otp: impl Into<String>) -> Result<Self, ConfigError> {
        let otp = otp.into().trim().to_string();
        let valid_len = (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&otp.len());
        if !valid_len || !otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidOtp { otp });
        }
        Ok(Self(otp))
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(*****)")
    }
}
