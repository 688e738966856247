//! Authentication and session types for the storefront client.
//!
//! # Overview
//!
//! - [`SessionContext`]: The explicitly passed holder of the bearer token and user
//! - [`TokenStore`]: Persistence seam for the token, with [`MemoryTokenStore`]
//! - [`BearerToken`]: The opaque credential issued by `/auth/login`
//! - [`UserSummary`]: The signed-in user as reported by the backend
//! - [`AccountClient`]: Login, registration, OTP verification and password recovery
//! - [`RegistrationForm`]: Registration payload with client-side validation
//! - [`PasswordStrength`]: The password strength heuristic
//!
//! # Session Lifecycle
//!
//! The session starts from whatever the [`TokenStore`] holds. Logging in
//! establishes it; logging out or any 401 from the backend invalidates it.
//! Invalidation never navigates; callers see
//! [`StorefrontError::AuthRequired`](crate::StorefrontError::AuthRequired).

mod account;
mod password;
mod registration;
pub mod session;
mod token;
mod user;

pub use account::AccountClient;
pub(crate) use account::{message_or, new_password_errors};
pub use password::{PasswordStrength, StrengthLevel};
pub use registration::RegistrationForm;
pub use session::{MemoryTokenStore, SessionContext, TokenStore};
pub use token::{BearerToken, AUTHORIZATION_HEADER};
pub use user::{UserSummary, ADMIN_ROLE};
