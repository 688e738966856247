//! Customer profile, password change and email change.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::{message_or, new_password_errors};
use crate::clients::RestClient;
use crate::config::{EmailAddress, OtpCode};
use crate::error::StorefrontError;
use crate::serde_helpers::optional_date;
use crate::validation::{is_valid_phone, ValidationErrors};

/// Sizes offered in the preferred-size menu.
pub const SIZE_OPTIONS: [&str; 7] = ["XS", "S", "M", "L", "XL", "XXL", "Free Size"];

/// Values offered in the gender menu.
pub const GENDER_OPTIONS: [&str; 4] = ["Female", "Male", "Unisex", "Prefer not to say"];

/// Profile served by `GET /customer/profile` and accepted by `PUT`.
///
/// The email (`username`) is read-only here; it changes only through the
/// OTP-confirmed email change flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub preferred_size: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub newsletter_opt_in: bool,
    #[serde(default)]
    pub terms_accepted: bool,
}

impl CustomerProfile {
    /// Checks the editable fields.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.first_name.trim().is_empty() {
            errors.add("firstName", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.add("lastName", "Last name is required");
        }
        if !self.phone_number.trim().is_empty() && !is_valid_phone(&self.phone_number) {
            errors.add(
                "phoneNumber",
                "Please enter a valid phone number (10-15 digits)",
            );
        }
        errors
    }
}

/// Client for the `/customer` endpoints. Every call requires a signed-in session.
#[derive(Clone, Debug)]
pub struct CustomerClient {
    rest: Arc<RestClient>,
}

impl CustomerClient {
    /// Creates a customer client over a shared REST client.
    #[must_use]
    pub const fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Loads the signed-in customer's profile.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::AuthRequired`] when signed out, or
    /// [`StorefrontError::Rest`] if the request fails.
    pub async fn profile(&self) -> Result<CustomerProfile, StorefrontError> {
        Ok(self.rest.get_json("customer/profile", None).await?)
    }

    /// Saves profile changes.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without sending anything if a
    /// field is invalid, otherwise the request error.
    pub async fn update_profile(&self, profile: &CustomerProfile) -> Result<(), StorefrontError> {
        profile.validate().into_result()?;
        self.rest
            .put("customer/profile", Some(json!(profile)), None)
            .await?;
        tracing::debug!("Profile updated");
        Ok(())
    }

    /// Changes the password of the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without sending anything if the
    /// current password is blank, the new passwords differ, or the new one
    /// fails the policy.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<String, StorefrontError> {
        let mut errors = new_password_errors(new_password, confirm_password, "newPassword");
        if current_password.is_empty() {
            errors.add("currentPassword", "Current password is required");
        }
        errors.into_result()?;

        let body = json!({
            "currentPassword": current_password,
            "newPassword": new_password,
            "confirmPassword": confirm_password,
        });
        let response = self
            .rest
            .post("customer/change-password", Some(body), None)
            .await?;
        Ok(message_or(&response, "Password changed successfully!"))
    }

    /// Sends an OTP to the new address.
    ///
    /// # Errors
    ///
    /// Returns the request error, for example when the address is taken.
    pub async fn request_email_change(&self, new_email: &EmailAddress) -> Result<String, StorefrontError> {
        let body = json!({ "newEmail": new_email });
        let response = self
            .rest
            .post("customer/request-email-change", Some(body), None)
            .await?;
        Ok(message_or(
            &response,
            "OTP sent to new email address. Please check your inbox.",
        ))
    }

    /// Confirms the email change with the OTP.
    ///
    /// On success the session is invalidated; the customer must sign in
    /// again with the new address.
    ///
    /// # Errors
    ///
    /// Returns the request error if the code is wrong or expired; the session
    /// is kept.
    pub async fn confirm_email_change(
        &self,
        new_email: &EmailAddress,
        otp: &OtpCode,
    ) -> Result<String, StorefrontError> {
        let body = json!({ "newEmail": new_email, "otp": otp.as_ref() });
        let response = self
            .rest
            .post("customer/confirm-email-change", Some(body), None)
            .await?;

        tracing::debug!("Email changed, signing out");
        self.rest.session().invalidate();
        Ok(message_or(
            &response,
            "Email changed successfully! Please login again.",
        ))
    }
}
