//! One handle that wires every storefront service to a shared session.

use std::sync::Arc;

use crate::auth::{AccountClient, SessionContext};
use crate::cart::{CartApi, CartReconciler};
use crate::catalog::{CatalogFetcher, ProductApi};
use crate::clients::RestClient;
use crate::config::StorefrontConfig;
use crate::customer::CustomerClient;
use crate::newsletter::NewsletterClient;
use crate::wishlist::WishlistClient;

/// Every storefront service over one REST client and one session.
///
/// A 401 from any service clears the shared session, so every other service
/// sees the sign-out immediately.
///
/// # Example
///
/// ```rust,ignore
/// use boutique_storefront::{SessionContext, Storefront, StorefrontConfig};
///
/// let store = Storefront::new(&StorefrontConfig::from_env()?, SessionContext::in_memory());
/// store.account().login("meera@example.com", "Saree@2024").await?;
/// store.cart().refresh().await?;
/// ```
#[derive(Debug)]
pub struct Storefront {
    rest: Arc<RestClient>,
    account: AccountClient,
    products: ProductApi,
    catalog: CatalogFetcher,
    cart: CartReconciler,
    wishlist: WishlistClient,
    customer: CustomerClient,
    newsletter: NewsletterClient,
}

// Verify Storefront is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Storefront>();
};

impl Storefront {
    /// Creates every service over a new REST client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created, see
    /// [`HttpClient::new`](crate::clients::HttpClient::new).
    #[must_use]
    pub fn new(config: &StorefrontConfig, session: SessionContext) -> Self {
        Self::with_rest_client(Arc::new(RestClient::new(config, session)))
    }

    /// Creates every service over an existing REST client.
    #[must_use]
    pub fn with_rest_client(rest: Arc<RestClient>) -> Self {
        let products = ProductApi::new(Arc::clone(&rest));
        Self {
            account: AccountClient::new(Arc::clone(&rest)),
            catalog: CatalogFetcher::new(Arc::new(products.clone())),
            products,
            cart: CartReconciler::new(Arc::new(CartApi::new(Arc::clone(&rest)))),
            wishlist: WishlistClient::new(Arc::clone(&rest)),
            customer: CustomerClient::new(Arc::clone(&rest)),
            newsletter: NewsletterClient::new(Arc::clone(&rest)),
            rest,
        }
    }

    /// Returns the shared session.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        self.rest.session()
    }

    /// Returns the shared REST client.
    #[must_use]
    pub fn rest_client(&self) -> &Arc<RestClient> {
        &self.rest
    }

    /// Login, registration and recovery.
    #[must_use]
    pub const fn account(&self) -> &AccountClient {
        &self.account
    }

    /// Product lookups.
    #[must_use]
    pub const fn products(&self) -> &ProductApi {
        &self.products
    }

    /// The latest-wins product list.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogFetcher {
        &self.catalog
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &CartReconciler {
        &self.cart
    }

    /// The wishlist.
    #[must_use]
    pub const fn wishlist(&self) -> &WishlistClient {
        &self.wishlist
    }

    /// Profile, password and email changes.
    #[must_use]
    pub const fn customer(&self) -> &CustomerClient {
        &self.customer
    }

    /// Newsletter sign-up.
    #[must_use]
    pub const fn newsletter(&self) -> &NewsletterClient {
        &self.newsletter
    }
}
