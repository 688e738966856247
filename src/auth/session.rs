//! Session management for the storefront client.
//!
//! This module provides [`SessionContext`], the explicitly passed holder of the
//! bearer token and signed-in user. A session is initialized at startup from a
//! [`TokenStore`], established on login, and invalidated on logout or whenever
//! the backend answers 401.
//!
//! # Lifecycle
//!
//! ```text
//! startup ── load from store ──> Anonymous | Authenticated
//! login ─────────────────────> Authenticated (token persisted)
//! logout / 401 ──────────────> Anonymous     (token removed from store)
//! ```
//!
//! # Example
//!
//! ```rust
//! use boutique_storefront::auth::{BearerToken, SessionContext};
//!
//! let session = SessionContext::in_memory();
//! assert!(!session.is_authenticated());
//!
//! session.establish(BearerToken::new("jwt"), None);
//! assert!(session.is_authenticated());
//!
//! session.invalidate();
//! assert!(session.token().is_none());
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::auth::token::BearerToken;
use crate::auth::user::UserSummary;

/// Persistent storage for the session token.
///
/// This is the seam to whatever the host platform offers (browser local
/// storage, a keychain, a file). Implementations must be cheap and
/// non-blocking; they are called while session state is updated.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Returns the stored token, if any.
    fn load(&self) -> Option<BearerToken>;

    /// Persists `token`, replacing any previous value.
    fn save(&self, token: &BearerToken);

    /// Removes the stored token.
    fn clear(&self);
}

/// A [`TokenStore`] that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<BearerToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<BearerToken> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &BearerToken) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<BearerToken>,
    user: Option<UserSummary>,
}

#[derive(Debug)]
struct SessionInner {
    store: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

/// Shared handle to the current authentication state.
///
/// Cloning is cheap; all clones observe the same session. Every client that
/// talks to the backend receives the handle explicitly rather than reading
/// global storage.
///
/// # Thread Safety
///
/// `SessionContext` is `Send + Sync`.
#[derive(Clone, Debug)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

// Verify SessionContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionContext>();
};

impl SessionContext {
    /// Creates a session backed by `store`, restoring any persisted token.
    ///
    /// A blank persisted token is discarded.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load().filter(|token| !token.is_empty());
        if token.is_some() {
            tracing::debug!("Restored persisted session token");
        }

        Self {
            inner: Arc::new(SessionInner {
                store,
                state: RwLock::new(SessionState { token, user: None }),
            }),
        }
    }

    /// Creates a session backed by a fresh [`MemoryTokenStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Returns the current bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<BearerToken> {
        self.read(|state| state.token.clone())
    }

    /// Returns the signed-in user once it is known.
    #[must_use]
    pub fn user(&self) -> Option<UserSummary> {
        self.read(|state| state.user.clone())
    }

    /// Returns `true` if a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.token.is_some())
    }

    /// Returns `true` if the signed-in user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read(|state| state.user.as_ref().is_some_and(UserSummary::is_admin))
    }

    /// Stores a freshly issued token and, when known, the user it belongs to.
    pub fn establish(&self, token: BearerToken, user: Option<UserSummary>) {
        self.inner.store.save(&token);
        self.write(|state| {
            state.token = Some(token);
            state.user = user;
        });
    }

    /// Records the signed-in user without touching the token.
    pub fn set_user(&self, user: UserSummary) {
        self.write(|state| state.user = Some(user));
    }

    /// Drops the token and user and clears the persistent store.
    ///
    /// Called on logout and whenever the backend rejects the token.
    pub fn invalidate(&self) {
        let had_token = self.write(|state| {
            state.user = None;
            state.token.take().is_some()
        });
        self.inner.store.clear();

        if had_token {
            tracing::debug!("Session invalidated");
        }
    }

    /// Invalidates the session only if it still holds `sent`, the token a
    /// rejected request carried.
    ///
    /// A 401 for a request issued before a newer login must not sign the new
    /// session out. Returns `true` if the session was invalidated.
    pub fn invalidate_if_current(&self, sent: Option<&BearerToken>) -> bool {
        let invalidated = self.write(|state| {
            if state.token.as_ref() != sent {
                return false;
            }
            state.user = None;
            state.token = None;
            self.inner.store.clear();
            true
        });

        if invalidated {
            tracing::debug!("Session invalidated");
        } else {
            tracing::debug!("Ignoring 401 for a token that has since been replaced");
        }
        invalidated
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let state = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::in_memory()
    }
}
