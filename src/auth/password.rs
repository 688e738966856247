//! Password strength heuristic shown while a password is typed.

use std::fmt;

use crate::validation::{MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARS};

/// Coarse strength level derived from a [`PasswordStrength`] score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLevel {
    /// Nothing typed or nothing satisfied; no meter is shown.
    None,
    /// Score 1 or 2.
    Weak,
    /// Score 3 or 4.
    Medium,
    /// All five criteria met.
    Strong,
}

impl StrengthLevel {
    /// Returns the meter label, empty for [`StrengthLevel::None`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Password strength score from 0 to 5.
///
/// One point each for: length of at least 8, a lowercase letter, an
/// uppercase letter, a digit, and one of `@$!%*?&`.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::auth::{PasswordStrength, StrengthLevel};
///
/// assert_eq!(PasswordStrength::of("").level(), StrengthLevel::None);
/// assert_eq!(PasswordStrength::of("abc").level(), StrengthLevel::Weak);
/// assert_eq!(PasswordStrength::of("Saree@2024").score(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    /// Highest possible score.
    pub const MAX: u8 = 5;

    /// Scores `password`.
    #[must_use]
    pub fn of(password: &str) -> Self {
        let checks = [
            password.chars().count() >= MIN_PASSWORD_LENGTH,
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)),
        ];
        // At most five checks, so the count always fits
        #[allow(clippy::cast_possible_truncation)]
        Self(checks.iter().filter(|passed| **passed).count() as u8)
    }

    /// Returns the raw score.
    #[must_use]
    pub const fn score(self) -> u8 {
        self.0
    }

    /// Returns the level shown by the strength meter.
    #[must_use]
    pub const fn level(self) -> StrengthLevel {
        match self.0 {
            0 => StrengthLevel::None,
            1 | 2 => StrengthLevel::Weak,
            3 | 4 => StrengthLevel::Medium,
            _ => StrengthLevel::Strong,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_criterion_adds_one_point() {
        assert_eq!(PasswordStrength::of("").score(), 0);
        assert_eq!(PasswordStrength::of("a").score(), 1);
        assert_eq!(PasswordStrength::of("aA").score(), 2);
        assert_eq!(PasswordStrength::of("aA1").score(), 3);
        assert_eq!(PasswordStrength::of("aA1@").score(), 4);
        assert_eq!(PasswordStrength::of("aA1@aaaa").score(), 5);
    }

    #[test]
    fn test_length_alone_counts() {
        assert_eq!(PasswordStrength::of("        ").score(), 1);
    }

    #[test]
    fn test_levels() {
        assert_eq!(PasswordStrength::of("").level(), StrengthLevel::None);
        assert_eq!(PasswordStrength::of("aA").level(), StrengthLevel::Weak);
        assert_eq!(PasswordStrength::of("aA1@").level(), StrengthLevel::Medium);
        assert_eq!(PasswordStrength::of("Lehenga#9").level(), StrengthLevel::Medium);
        assert_eq!(PasswordStrength::of("Lehenga&9").level(), StrengthLevel::Strong);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StrengthLevel::None.label(), "");
        assert_eq!(StrengthLevel::Strong.to_string(), "Strong");
    }
}
