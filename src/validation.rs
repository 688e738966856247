//! Client-side form validation.
//!
//! Validation failures block submission locally and are surfaced inline next
//! to the offending field. They are collected into [`ValidationErrors`] so a
//! form can report every problem at once.
//!
//! # Example
//!
//! ```rust
//! use boutique_storefront::validation::{is_valid_email, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! if !is_valid_email("not-an-email") {
//!     errors.add("username", "Please enter a valid email address");
//! }
//! assert_eq!(errors.get("username"), Some("Please enter a valid email address"));
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Characters that count as "special" for the password policy.
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Field-level validation errors, kept in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates an error set holding a single field error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records an error for `field`. Only the first error per field is kept.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    /// Returns the error message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    /// Returns `true` if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Converts into `Ok(())` when empty, `Err(self)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[+]?[0-9]{10,15}$").expect("valid phone regex"))
}

/// Returns `true` if `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Returns `true` for 10 to 15 digits with an optional leading `+`.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Returns `true` if `password` satisfies the account password policy.
///
/// The policy requires at least [`MIN_PASSWORD_LENGTH`] characters drawn from
/// ASCII letters, digits and [`PASSWORD_SPECIAL_CHARS`], with at least one
/// lowercase letter, one uppercase letter, one digit and one special character.
#[must_use]
pub fn meets_password_policy(password: &str) -> bool {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIAL_CHARS.contains(c));

    allowed
        && password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c))
}
