//! Configuration types for the boutique storefront client.
//!
//! # Overview
//!
//! - [`StorefrontConfig`]: The configuration shared by every client
//! - [`StorefrontConfigBuilder`]: A builder for constructing [`StorefrontConfig`] instances
//! - [`ApiBaseUrl`]: The validated backend base URL
//! - [`EmailAddress`]: A validated email address
//! - [`OtpCode`]: A validated one-time code with masked debug output
//!
//! # Example
//!
//! ```rust
//! use boutique_storefront::{ApiBaseUrl, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .base_url(ApiBaseUrl::new("https://api.anvistudio.in/api").unwrap())
//!     .user_agent_prefix("AnviWeb/2.0")
//!     .build();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.anvistudio.in/api");
//! ```

mod newtypes;

pub use newtypes::{ApiBaseUrl, EmailAddress, OtpCode};

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "BOUTIQUE_API_URL";

/// Environment variable holding an optional User-Agent prefix.
pub const USER_AGENT_PREFIX_ENV: &str = "BOUTIQUE_USER_AGENT_PREFIX";

/// Configuration for the storefront client.
///
/// # Thread Safety
///
/// `StorefrontConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    base_url: ApiBaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl StorefrontConfig {
    /// Creates a new builder for constructing a `StorefrontConfig`.
    #[must_use]
    pub fn builder() -> StorefrontConfigBuilder {
        StorefrontConfigBuilder::new()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads [`API_URL_ENV`] (falling back to [`ApiBaseUrl::DEFAULT`]) and
    /// [`USER_AGENT_PREFIX_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if the base URL variable is set
    /// but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(raw) = std::env::var(API_URL_ENV) {
            let base_url = ApiBaseUrl::new(raw).map_err(|e| ConfigError::InvalidEnvVar {
                name: API_URL_ENV,
                reason: e.to_string(),
            })?;
            builder = builder.base_url(base_url);
        }

        if let Ok(prefix) = std::env::var(USER_AGENT_PREFIX_ENV) {
            if !prefix.trim().is_empty() {
                builder = builder.user_agent_prefix(prefix.trim());
            }
        }

        Ok(builder.build())
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// Verify StorefrontConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontConfig>();
};

/// Builder for constructing [`StorefrontConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: [`ApiBaseUrl::DEFAULT`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (reqwest default)
#[derive(Debug, Default)]
pub struct StorefrontConfigBuilder {
    base_url: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl StorefrontConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL.
    #[must_use]
    pub fn base_url(mut self, url: ApiBaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`StorefrontConfig`]. Every field has a default.
    #[must_use]
    pub fn build(self) -> StorefrontConfig {
        StorefrontConfig {
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = StorefrontConfig::builder().build();

        assert_eq!(config.base_url().as_ref(), ApiBaseUrl::DEFAULT);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = StorefrontConfig::builder()
            .base_url(ApiBaseUrl::new("https://shop.example.com/api").unwrap())
            .user_agent_prefix("AnviWeb/2.0")
            .timeout(Duration::from_secs(10))
            .build();

        assert_eq!(config.base_url().as_ref(), "https://shop.example.com/api");
        assert_eq!(config.user_agent_prefix(), Some("AnviWeb/2.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorefrontConfig>();
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = StorefrontConfig::default();
        let cloned = config.clone();
        assert_eq!(cloned.base_url(), config.base_url());
        assert!(format!("{config:?}").contains("StorefrontConfig"));
    }
}
