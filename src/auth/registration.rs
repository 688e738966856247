//! Customer registration form and its client-side validation.

use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_email, is_valid_phone, meets_password_policy, ValidationErrors};

const NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=50;

/// Registration payload sent to `POST /auth/register`.
///
/// The required fields are validated locally by [`validate`](Self::validate)
/// before anything is sent. The progressive profiling fields are optional.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::auth::RegistrationForm;
///
/// let form = RegistrationForm {
///     first_name: "Meera".to_string(),
///     last_name: "Rao".to_string(),
///     username: "meera@example.com".to_string(),
///     password: "Saree@2024".to_string(),
///     confirm_password: "Saree@2024".to_string(),
///     phone_number: "9876543210".to_string(),
///     terms_accepted: true,
///     ..Default::default()
/// };
/// assert!(form.validate().is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Given name, 2 to 50 characters.
    pub first_name: String,
    /// Family name, 2 to 50 characters.
    pub last_name: String,
    /// Email address used as the login name.
    pub username: String,
    /// Password meeting the account password policy.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// 10 to 15 digits with an optional leading `+`.
    pub phone_number: String,
    /// Must be `true` to register.
    pub terms_accepted: bool,
    /// Optional preferred garment size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_size: Option<String>,
    /// Optional gender or style preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Optional date of birth as entered (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Newsletter opt-in.
    #[serde(default)]
    pub newsletter_opt_in: bool,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("password", &"*****")
            .field("confirm_password", &"*****")
            .field("phone_number", &self.phone_number)
            .field("terms_accepted", &self.terms_accepted)
            .field("newsletter_opt_in", &self.newsletter_opt_in)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Checks every required field and returns all failures, keyed by the
    /// field's wire name.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        check_name(&mut errors, "firstName", "First name", &self.first_name);
        check_name(&mut errors, "lastName", "Last name", &self.last_name);

        if self.username.trim().is_empty() {
            errors.add("username", "Email is required");
        } else if !is_valid_email(&self.username) {
            errors.add("username", "Please enter a valid email address");
        }

        if self.phone_number.trim().is_empty() {
            errors.add("phoneNumber", "Phone number is required");
        } else if !is_valid_phone(&self.phone_number) {
            errors.add(
                "phoneNumber",
                "Please enter a valid phone number (10-15 digits)",
            );
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if !meets_password_policy(&self.password) {
            errors.add(
                "password",
                "Password must be at least 8 characters with 1 uppercase, 1 lowercase, 1 number, and 1 special character (@$!%*?&)",
            );
        }

        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.add("confirmPassword", "Passwords do not match");
        }

        if !self.terms_accepted {
            errors.add(
                "termsAccepted",
                "You must accept the Terms and Privacy Policy to register",
            );
        }

        errors
    }
}

fn check_name(errors: &mut ValidationErrors, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    } else if !NAME_LENGTH.contains(&value.chars().count()) {
        errors.add(field, format!("{label} must be between 2 and 50 characters"));
    }
}
