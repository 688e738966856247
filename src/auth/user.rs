//! The signed-in user as reported by the backend.

use serde::{Deserialize, Serialize};

/// Role string the backend assigns to shop administrators.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Summary of the authenticated user returned by `/auth/login` and `/auth/me`.
///
/// # Example
///
/// ```rust
/// use boutique_storefront::auth::UserSummary;
///
/// let user: UserSummary = serde_json::from_str(
///     r#"{"id":7,"username":"meera@example.com","role":"CUSTOMER","verified":true}"#,
/// ).unwrap();
///
/// assert_eq!(user.username, "meera@example.com");
/// assert!(!user.is_admin());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Backend user ID.
    pub id: u64,

    /// Login name; the backend uses the email address.
    pub username: String,

    /// Role name, e.g. `CUSTOMER` or `ADMIN`.
    pub role: String,

    /// Whether the email address has been verified with an OTP.
    #[serde(default)]
    pub verified: bool,
}

impl UserSummary {
    /// Returns `true` for shop administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
