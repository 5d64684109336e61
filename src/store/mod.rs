//! Collection stores
//!
//! A [`CollectionStore`] owns the authoritative in-memory list of one record
//! type, the active filter and the derived filtered view. Mutations go through
//! the backend and are followed by a full reload; the store never merges
//! changes locally, except for order status updates (see [`OrderStore`]).
//!
//! # Architecture
//!
//! ```text
//! view ──load()──▶ CollectionStore ──fetch_all──▶ DashboardApi
//!                        │
//!                 token still latest?
//!                        │
//!                  ──yes──▶ replace list, recompute filtered view, notify
//! ```
//!
//! Stores are handles: clones share the same state, which is how the orders
//! poller and the orders view write to one list.

mod orders;
pub mod poller;
mod record;

pub use poller::Poller;
pub use record::{Editable, Record};

use crate::core::{
    ApiError, ApiResult, Category, DashboardApi, Filter, Order, Product, RecordId, filtered_view,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;

/// Store of menu categories
pub type CategoryStore = CollectionStore<Category>;

/// Store of menu products, filtered by category
pub type ProductStore = CollectionStore<Product>;

/// Store of orders, filtered by status
pub type OrderStore = CollectionStore<Order>;

struct CollectionState<R: Record> {
    items: Vec<R>,
    filter: Filter<R::Key>,
    filtered: Vec<R>,
    loading: bool,
    loaded: bool,
    error: Option<String>,
}

impl<R: Record> CollectionState<R> {
    fn refilter(&mut self) {
        self.filtered = filtered_view(&self.items, &self.filter);
    }
}

/// Authoritative list of one record type
pub struct CollectionStore<R: Record> {
    api: Arc<dyn DashboardApi>,
    state: Arc<RwLock<CollectionState<R>>>,
    /// Token of the most recently issued load
    issued: Arc<AtomicU64>,
    changes: Arc<watch::Sender<u64>>,
}

impl<R: Record> Clone for CollectionStore<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            issued: Arc::clone(&self.issued),
            changes: Arc::clone(&self.changes),
        }
    }
}

/// Clears the loading flag when a load ends, including when its future is
/// dropped mid-request, unless a newer load has been issued since.
struct LoadingGuard<'a, R: Record> {
    store: &'a CollectionStore<R>,
    token: u64,
}

impl<R: Record> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        if self.store.is_latest(self.token) {
            self.store.mutate(|state| state.loading = false);
        }
    }
}

impl<R: Record> CollectionStore<R> {
    /// Create an empty store backed by the given API
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            api,
            state: Arc::new(RwLock::new(CollectionState {
                items: Vec::new(),
                filter: Filter::All,
                filtered: Vec::new(),
                loading: false,
                loaded: false,
                error: None,
            })),
            issued: Arc::new(AtomicU64::new(0)),
            changes: Arc::new(changes),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&CollectionState<R>) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut CollectionState<R>) -> T) -> T {
        let result = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut state)
        };
        self.changes.send_modify(|version| *version += 1);
        result
    }

    fn is_latest(&self, token: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == token
    }

    fn fail(&self, message: String, err: &ApiError) {
        tracing::warn!(resource = R::RESOURCE, error = %err, "{}", message);
        self.mutate(|state| state.error = Some(message));
    }

    // === Accessors ===

    /// The full list, in server order
    pub fn items(&self) -> Vec<R> {
        self.read(|state| state.items.clone())
    }

    /// The list after the active filter
    pub fn filtered(&self) -> Vec<R> {
        self.read(|state| state.filtered.clone())
    }

    pub fn filter(&self) -> Filter<R::Key> {
        self.read(|state| state.filter.clone())
    }

    /// Look up a record of the full list by id
    pub fn get(&self, id: RecordId) -> Option<R> {
        self.read(|state| state.items.iter().find(|r| r.id() == id).cloned())
    }

    pub fn len(&self) -> usize {
        self.read(|state| state.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.read(|state| state.loading)
    }

    /// Whether at least one load has succeeded
    pub fn has_loaded(&self) -> bool {
        self.read(|state| state.loaded)
    }

    /// Message of the last failure, if not cleared by a successful load
    pub fn error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    pub fn clear_error(&self) {
        self.mutate(|state| state.error = None);
    }

    /// Receiver notified after every state change
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    // === Operations ===

    /// Replace the active filter and recompute the filtered view, without
    /// fetching
    pub fn set_filter(&self, filter: Filter<R::Key>) {
        self.mutate(|state| {
            state.filter = filter;
            state.refilter();
        });
    }

    /// Fetch the full list and replace the local one
    ///
    /// On failure the previous list is kept and the error slot is set. A
    /// response is applied only if no newer load was issued meanwhile.
    pub async fn load(&self) -> ApiResult<()> {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.mutate(|state| state.loading = true);
        let _guard = LoadingGuard { store: self, token };

        let result = R::fetch_all(self.api.as_ref()).await;

        if !self.is_latest(token) {
            tracing::debug!(resource = R::RESOURCE, token, "discarding stale list response");
            return result.map(|_| ());
        }

        match result {
            Ok(items) => {
                tracing::debug!(resource = R::RESOURCE, count = items.len(), "list loaded");
                self.mutate(|state| {
                    state.items = items;
                    state.refilter();
                    state.loaded = true;
                    state.error = None;
                });
                Ok(())
            }
            Err(err) => {
                self.fail(format!("Error loading {}: {}", R::RESOURCE, err), &err);
                Err(err)
            }
        }
    }

    /// Delete a record, then reload
    pub async fn delete(&self, id: RecordId) -> ApiResult<()> {
        match R::remove(self.api.as_ref(), id).await {
            Ok(_) => {
                tracing::info!(resource = R::RESOURCE, id, "record deleted");
                self.resync().await;
                Ok(())
            }
            Err(err) => {
                self.fail(format!("Error deleting {} {}: {}", R::SINGULAR, id, err), &err);
                Err(err)
            }
        }
    }

    async fn resync(&self) {
        // The mutation went through either way; load() records its own failure
        let _ = self.load().await;
    }
}

impl<R: Editable> CollectionStore<R> {
    /// Create a record, then reload
    ///
    /// Returns the id the backend assigned, when it reports one.
    pub async fn create(&self, payload: &R::Payload) -> ApiResult<Option<RecordId>> {
        match R::create(self.api.as_ref(), payload).await {
            Ok(ack) => {
                tracing::info!(resource = R::RESOURCE, id = ?ack.id, "record created");
                self.resync().await;
                Ok(ack.id)
            }
            Err(err) => {
                self.fail(format!("Error creating {}: {}", R::SINGULAR, err), &err);
                Err(err)
            }
        }
    }

    /// Update a record, then reload
    pub async fn update(&self, id: RecordId, payload: &R::Payload) -> ApiResult<()> {
        match R::update(self.api.as_ref(), id, payload).await {
            Ok(_) => {
                tracing::info!(resource = R::RESOURCE, id, "record updated");
                self.resync().await;
                Ok(())
            }
            Err(err) => {
                self.fail(format!("Error updating {} {}: {}", R::SINGULAR, id, err), &err);
                Err(err)
            }
        }
    }
}
