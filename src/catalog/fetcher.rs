//! Latest-wins product list fetching.
//!
//! Every request is tagged with a sequence number when it is issued. A
//! response is applied only if no newer request was issued after it, so a
//! slow answer for an old filter can never overwrite the list for the
//! current one.
//!
//! ```text
//! fetch(Sarees)   seq 1 ──────────────────────────> response (discarded)
//! fetch(Lehengas) seq 2 ─────────> response (applied)
//! ```
//!
//! A failed request leaves the previous list in place and records a notice.
//!
//! # Thread Safety
//!
//! [`CatalogFetcher`] is `Send + Sync` and cheap to clone. The view lock is
//! never held across a network call.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::api::CatalogSource;
use crate::catalog::filter::FilterState;
use crate::catalog::product::Product;
use crate::error::StorefrontError;

/// What became of one fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The response was current and replaced the displayed list.
    Applied {
        /// Number of products now displayed.
        count: usize,
    },
    /// A newer request was issued first; the response was discarded.
    Superseded,
    /// The current request failed; the previous list stays displayed.
    Failed(StorefrontError),
}

impl FetchOutcome {
    /// Returns `true` for [`FetchOutcome::Applied`].
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Snapshot of what the product grid shows.
#[derive(Clone, Debug, Default)]
pub struct CatalogView {
    /// The displayed products.
    pub products: Vec<Product>,
    /// The filter the displayed products were fetched for.
    pub filter: Option<FilterState>,
    /// Transient failure message, if the latest request failed.
    pub notice: Option<String>,
    applied_seq: u64,
    settled_seq: u64,
}

impl CatalogView {
    /// Sequence number of the request whose products are displayed.
    #[must_use]
    pub const fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}

#[derive(Debug, Default)]
struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

struct FetcherInner {
    source: Arc<dyn CatalogSource>,
    sequencer: Sequencer,
    view: Mutex<CatalogView>,
}

impl FetcherInner {
    fn view(&self) -> MutexGuard<'_, CatalogView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(&self, seq: u64, filter: FilterState) -> FetchOutcome {
        let result = self.source.list_products(&filter).await;

        let mut view = self.view();
        // Checked under the view lock so a newer response cannot be
        // overwritten between the check and the write.
        if !self.sequencer.is_current(seq) {
            tracing::debug!(seq, latest = self.sequencer.latest(), "Discarding superseded product list");
            return FetchOutcome::Superseded;
        }

        view.settled_seq = seq;
        match result {
            Ok(products) => {
                let count = products.len();
                view.products = products;
                view.filter = Some(filter);
                view.notice = None;
                view.applied_seq = seq;
                tracing::debug!(seq, count, "Applied product list");
                FetchOutcome::Applied { count }
            }
            Err(error) => {
                tracing::warn!(seq, error = %error, "Product list request failed");
                view.notice = Some(error.notice());
                FetchOutcome::Failed(error)
            }
        }
    }
}

/// Fetches product lists and keeps only the newest answer.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use boutique_storefront::catalog::{CatalogFetcher, ProductApi, UrlSync};
///
/// let fetcher = CatalogFetcher::new(Arc::new(ProductApi::new(rest)));
/// let sync = UrlSync::from_query("?category=Sarees");
/// let task = fetcher.spawn_watch(sync.subscribe());
/// ```
#[derive(Clone)]
pub struct CatalogFetcher {
    inner: Arc<FetcherInner>,
}

// Verify CatalogFetcher is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CatalogFetcher>();
};

impl std::fmt::Debug for CatalogFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogFetcher")
            .field("latest_seq", &self.inner.sequencer.latest())
            .field("view", &*self.inner.view())
            .finish_non_exhaustive()
    }
}

impl CatalogFetcher {
    /// Creates a fetcher with an empty view.
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            inner: Arc::new(FetcherInner {
                source,
                sequencer: Sequencer::default(),
                view: Mutex::new(CatalogView::default()),
            }),
        }
    }

    /// Issues a request for `filter`.
    ///
    /// The sequence number is taken immediately, before the returned future
    /// is first polled, so the order of `fetch` calls is the order that
    /// decides which response wins.
    pub fn fetch(&self, filter: FilterState) -> impl Future<Output = FetchOutcome> + Send + 'static {
        let seq = self.inner.sequencer.issue();
        tracing::debug!(seq, query = %filter.to_query_string(), "Fetching product list");
        let inner = Arc::clone(&self.inner);
        async move { inner.run(seq, filter).await }
    }

    /// Re-fetches on every published filter change until the sender is dropped.
    ///
    /// The current value is fetched right away. Each change spawns its own
    /// request, so an earlier request still in flight is superseded rather
    /// than awaited.
    pub fn spawn_watch(&self, mut filters: watch::Receiver<FilterState>) -> JoinHandle<()> {
        let fetcher = self.clone();
        tokio::spawn(async move {
            loop {
                let filter = filters.borrow_and_update().clone();
                tokio::spawn(fetcher.fetch(filter));
                if filters.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    /// Returns the displayed products.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner.view().products.clone()
    }

    /// Returns the pending failure notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        self.inner.view().notice.clone()
    }

    /// Dismisses the failure notice.
    pub fn clear_notice(&self) {
        self.inner.view().notice = None;
    }

    /// Returns a snapshot of the whole view.
    #[must_use]
    pub fn view(&self) -> CatalogView {
        self.inner.view().clone()
    }

    /// Returns `true` while the newest request has not settled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        let view = self.inner.view();
        view.settled_seq != self.inner.sequencer.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::FilterField;
    use crate::clients::{HttpError, HttpResponseError, RestError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    type Reply = Result<Vec<Product>, StorefrontError>;

    /// Answers each category only when the test releases it.
    #[derive(Default)]
    struct ScriptedSource {
        pending: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    }

    impl ScriptedSource {
        fn expect(&self, category: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.pending
                .lock()
                .unwrap()
                .insert(category.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn list_products(&self, filter: &FilterState) -> Reply {
            let rx = self.pending.lock().unwrap().remove(filter.category());
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| Ok(Vec::new())),
                None => Ok(Vec::new()),
            }
        }
    }

    fn products(category: &str, count: u64) -> Vec<Product> {
        (1..=count)
            .map(|id| {
                serde_json::from_value(json!({
                    "id": id,
                    "name": format!("{category} {id}"),
                    "price": "1000",
                    "category": category,
                    "stockQuantity": 10
                }))
                .unwrap()
            })
            .collect()
    }

    fn category(name: &str) -> FilterState {
        FilterState::default()
            .set_filter(FilterField::Category, name)
            .unwrap()
    }

    fn server_error(message: &str) -> StorefrontError {
        StorefrontError::Rest(RestError::Http(HttpError::Response(HttpResponseError {
            code: 500,
            message: message.to_string(),
        })))
    }

    #[tokio::test]
    async fn test_late_response_for_older_filter_is_discarded() {
        let source = Arc::new(ScriptedSource::default());
        let sarees = source.expect("Sarees");
        let lehengas = source.expect("Lehengas");
        let fetcher = CatalogFetcher::new(source.clone());

        let first = tokio::spawn(fetcher.fetch(category("Sarees")));
        let second = tokio::spawn(fetcher.fetch(category("Lehengas")));
        assert!(fetcher.is_loading());

        lehengas.send(Ok(products("Lehengas", 2))).unwrap();
        assert!(second.await.unwrap().is_applied());

        sarees.send(Ok(products("Sarees", 5))).unwrap();
        assert!(matches!(first.await.unwrap(), FetchOutcome::Superseded));

        let shown = fetcher.products();
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|p| p.category == "Lehengas"));
        assert_eq!(fetcher.view().filter.unwrap().category(), "Lehengas");
        assert!(!fetcher.is_loading());
    }

    #[tokio::test]
    async fn test_in_order_responses_apply_latest() {
        let source = Arc::new(ScriptedSource::default());
        let sarees = source.expect("Sarees");
        let kurtis = source.expect("Kurtis");
        let fetcher = CatalogFetcher::new(source.clone());

        let first = tokio::spawn(fetcher.fetch(category("Sarees")));
        let second = tokio::spawn(fetcher.fetch(category("Kurtis")));

        sarees.send(Ok(products("Sarees", 1))).unwrap();
        assert!(matches!(first.await.unwrap(), FetchOutcome::Superseded));

        kurtis.send(Ok(products("Kurtis", 3))).unwrap();
        assert!(matches!(second.await.unwrap(), FetchOutcome::Applied { count: 3 }));
        assert_eq!(fetcher.view().applied_seq(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_list_and_sets_notice() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = CatalogFetcher::new(source.clone());

        let ok = source.expect("Sarees");
        let pending = tokio::spawn(fetcher.fetch(category("Sarees")));
        ok.send(Ok(products("Sarees", 4))).unwrap();
        assert!(pending.await.unwrap().is_applied());

        let failing = source.expect("Lehengas");
        let pending = tokio::spawn(fetcher.fetch(category("Lehengas")));
        failing.send(Err(server_error("Database unavailable"))).unwrap();
        assert!(matches!(pending.await.unwrap(), FetchOutcome::Failed(_)));

        assert_eq!(fetcher.products().len(), 4);
        assert_eq!(fetcher.notice().as_deref(), Some("Database unavailable"));
        assert!(!fetcher.is_loading());

        fetcher.clear_notice();
        assert!(fetcher.notice().is_none());
    }

    #[tokio::test]
    async fn test_superseded_failure_sets_no_notice() {
        let source = Arc::new(ScriptedSource::default());
        let old = source.expect("Sarees");
        let new = source.expect("Lehengas");
        let fetcher = CatalogFetcher::new(source.clone());

        let first = tokio::spawn(fetcher.fetch(category("Sarees")));
        let second = tokio::spawn(fetcher.fetch(category("Lehengas")));

        old.send(Err(server_error("timeout"))).unwrap();
        assert!(matches!(first.await.unwrap(), FetchOutcome::Superseded));
        assert!(fetcher.notice().is_none());

        new.send(Ok(products("Lehengas", 1))).unwrap();
        assert!(second.await.unwrap().is_applied());
    }

    #[tokio::test]
    async fn test_spawn_watch_fetches_initial_and_changed_filters() {
        let source = Arc::new(ScriptedSource::default());
        let initial = source.expect("Sarees");
        let fetcher = CatalogFetcher::new(source.clone());
        let (tx, rx) = watch::channel(category("Sarees"));

        let task = fetcher.spawn_watch(rx);
        initial.send(Ok(products("Sarees", 2))).unwrap();
        for _ in 0..50 {
            if fetcher.products().len() == 2 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(fetcher.products().len(), 2);

        let changed = source.expect("Lehengas");
        tx.send(category("Lehengas")).unwrap();
        changed.send(Ok(products("Lehengas", 1))).unwrap();
        for _ in 0..50 {
            if fetcher.products().len() == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(fetcher.products()[0].category, "Lehengas");

        drop(tx);
        task.await.unwrap();
    }
}
