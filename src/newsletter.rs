//! Newsletter subscription.

use std::sync::Arc;

use serde_json::json;

use crate::auth::message_or;
use crate::clients::RestClient;
use crate::error::StorefrontError;
use crate::validation::{is_valid_email, ValidationErrors};

/// Client for `POST /newsletter/subscribe`. No session is required.
#[derive(Clone, Debug)]
pub struct NewsletterClient {
    rest: Arc<RestClient>,
}

impl NewsletterClient {
    /// Creates a newsletter client over a shared REST client.
    #[must_use]
    pub const fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Subscribes an email address and returns the confirmation message.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without sending anything if the
    /// address is malformed. Returns [`StorefrontError::Rest`] when the
    /// backend refuses, e.g. for an address that is already subscribed;
    /// [`StorefrontError::notice`] then carries the backend's reason.
    pub async fn subscribe(&self, email: &str) -> Result<String, StorefrontError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationErrors::single("email", "Email is required").into());
        }
        if !is_valid_email(email) {
            return Err(
                ValidationErrors::single("email", "Please enter a valid email address").into(),
            );
        }

        let response = self
            .rest
            .post("newsletter/subscribe", Some(json!({ "email": email })), None)
            .await?;
        tracing::debug!("Newsletter subscription accepted");
        Ok(message_or(&response, "Successfully subscribed!"))
    }
}
