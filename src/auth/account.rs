//! Account flows: login, registration, OTP verification and password recovery.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::auth::registration::RegistrationForm;
use crate::auth::token::BearerToken;
use crate::auth::user::UserSummary;
use crate::clients::{HttpResponse, RestClient};
use crate::config::{EmailAddress, OtpCode};
use crate::error::StorefrontError;
use crate::validation::{meets_password_policy, ValidationErrors};

const CUSTOMER_ROLE: &str = "CUSTOMER";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: BearerToken,
    user: UserSummary,
}

/// Client for the `/auth` and `/verify` endpoints.
///
/// Login stores the issued token in the shared
/// [`SessionContext`](crate::auth::SessionContext); logout and any 401 clear it.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use boutique_storefront::{AccountClient, RestClient, SessionContext, StorefrontConfig};
///
/// let rest = Arc::new(RestClient::new(&StorefrontConfig::default(), SessionContext::in_memory()));
/// let account = AccountClient::new(rest);
/// let user = account.login("meera@example.com", "Saree@2024").await?;
/// ```
#[derive(Clone, Debug)]
pub struct AccountClient {
    rest: Arc<RestClient>,
}

impl AccountClient {
    /// Creates an account client over a shared REST client.
    #[must_use]
    pub const fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Signs in with an email address or phone number.
    ///
    /// On success the token and user are stored in the session. A customer
    /// whose email is not yet verified is signed straight back out.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Validation`] if either field is blank
    /// - [`StorefrontError::InvalidCredentials`] if the backend rejects them
    /// - [`StorefrontError::EmailNotVerified`] for unverified customers
    /// - [`StorefrontError::Rest`] for any other request failure
    pub async fn login(&self, username: &str, password: &str) -> Result<UserSummary, StorefrontError> {
        let username = username.trim();
        let mut errors = ValidationErrors::new();
        if username.is_empty() {
            errors.add("username", "Username/Email is required");
        }
        if password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()?;

        let body = json!({ "username": username, "password": password });

        let response: LoginResponse = match self.rest.post_json("auth/login", Some(body), None).await {
            Ok(response) => response,
            Err(e) if e.is_unauthorized() => return Err(StorefrontError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        };

        if response.token.is_empty() {
            return Err(StorefrontError::InvalidCredentials);
        }

        if !response.user.verified && response.user.role == CUSTOMER_ROLE {
            tracing::debug!("Login refused for unverified customer");
            self.rest.session().invalidate();
            return Err(StorefrontError::EmailNotVerified {
                username: response.user.username,
            });
        }

        self.rest
            .session()
            .establish(response.token, Some(response.user.clone()));
        tracing::debug!(user_id = response.user.id, "Logged in");

        Ok(response.user)
    }

    /// Registers a new customer. The backend emails an OTP on success.
    ///
    /// Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without sending anything if the
    /// form is invalid, or [`StorefrontError::Rest`] if the backend refuses.
    pub async fn register(&self, form: &RegistrationForm) -> Result<String, StorefrontError> {
        form.validate().into_result()?;

        let body = json!(form);
        let response = self.rest.post("auth/register", Some(body), None).await?;
        Ok(message_or(
            &response,
            "Registration successful! Please check your email for the OTP.",
        ))
    }

    /// Fetches the signed-in user from `/auth/me` and records it in the session.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::AuthRequired`] if the token was rejected.
    pub async fn current_user(&self) -> Result<UserSummary, StorefrontError> {
        let user: UserSummary = self.rest.get_json("auth/me", None).await?;
        self.rest.session().set_user(user.clone());
        Ok(user)
    }

    /// Validates a persisted token at startup.
    ///
    /// Returns `None` when there is no token, or when the token could not be
    /// confirmed, in which case it is discarded.
    pub async fn restore_session(&self) -> Option<UserSummary> {
        if !self.rest.session().is_authenticated() {
            return None;
        }

        match self.current_user().await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Session expired or invalid token");
                self.rest.session().invalidate();
                None
            }
        }
    }

    /// Confirms a newly registered account with the emailed OTP.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the code is wrong or expired.
    pub async fn verify_account(
        &self,
        otp: &OtpCode,
        email: &EmailAddress,
    ) -> Result<String, StorefrontError> {
        let query = otp_query(otp, email);
        let response = self.rest.get("verify/account", Some(query)).await?;
        Ok(message_or(&response, "Account verified successfully."))
    }

    /// Requests a fresh verification OTP.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the backend refuses.
    pub async fn resend_otp(&self, email: &EmailAddress) -> Result<String, StorefrontError> {
        let response = self
            .rest
            .post("verify/resend-otp", None, Some(email_query(email)))
            .await?;
        Ok(message_or(
            &response,
            "A new verification code has been sent to your email.",
        ))
    }

    /// Starts password recovery by emailing a reset OTP.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the email is unknown.
    pub async fn forgot_password(&self, email: &EmailAddress) -> Result<String, StorefrontError> {
        let response = self
            .rest
            .post("auth/forgot-password", None, Some(email_query(email)))
            .await?;
        Ok(message_or(&response, "OTP sent."))
    }

    /// Checks a password-reset OTP.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Rest`] if the code is wrong or expired.
    pub async fn verify_reset_otp(
        &self,
        otp: &OtpCode,
        email: &EmailAddress,
    ) -> Result<String, StorefrontError> {
        let response = self
            .rest
            .post("auth/verify-reset-otp", None, Some(otp_query(otp, email)))
            .await?;
        Ok(message_or(&response, "OTP verified."))
    }

    /// Sets a new password after a verified reset OTP.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without sending anything if the
    /// passwords differ or the new one fails the policy.
    pub async fn reset_password(
        &self,
        email: &EmailAddress,
        password: &str,
        confirm_password: &str,
    ) -> Result<String, StorefrontError> {
        new_password_errors(password, confirm_password, "password").into_result()?;

        let query = vec![
            ("email".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
            ("confirmPassword".to_string(), confirm_password.to_string()),
        ];
        let response = self
            .rest
            .post("auth/reset-password", None, Some(query))
            .await?;
        Ok(message_or(&response, "Password reset successfully."))
    }

    /// Signs out locally. The backend keeps no session state.
    pub fn logout(&self) {
        self.rest.session().invalidate();
        tracing::debug!("Logged out");
    }
}

/// Checks a new password and its confirmation. Used by every flow that sets one.
pub(crate) fn new_password_errors(
    password: &str,
    confirm_password: &str,
    field: &str,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if password.is_empty() {
        errors.add(field, "Password is required");
    } else if !meets_password_policy(password) {
        errors.add(
            field,
            "Password must be at least 8 characters with 1 uppercase, 1 lowercase, 1 number, and 1 special character (@$!%*?&)",
        );
    }
    if password != confirm_password {
        errors.add("confirmPassword", "Passwords do not match");
    }
    errors
}

/// Returns the backend's `message` or a default confirmation.
pub(crate) fn message_or(response: &HttpResponse, default: &str) -> String {
    response
        .message()
        .map_or_else(|| default.to_string(), str::to_string)
}

fn email_query(email: &EmailAddress) -> Vec<(String, String)> {
    vec![("email".to_string(), email.to_string())]
}

fn otp_query(otp: &OtpCode, email: &EmailAddress) -> Vec<(String, String)> {
    vec![
        ("otp".to_string(), otp.as_ref().to_string()),
        ("email".to_string(), email.to_string()),
    ]
}
