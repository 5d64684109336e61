//! Orders view coordinator

use crate::core::{ApiResult, DashboardApi, Filter, Order, OrderStatus, RecordId};
use crate::store::{OrderStore, Poller};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct OrdersViewState {
    selected_status: Filter<OrderStatus>,
    poller: Option<Poller>,
}

/// Wires the order board's user actions to the orders store
///
/// While active, the store is reloaded in the background at a fixed
/// interval. The refresh task is tied to this view: [`deactivate`](Self::deactivate)
/// stops it, and dropping the view aborts it.
pub struct OrdersView {
    api: Arc<dyn DashboardApi>,
    store: OrderStore,
    refresh_every: Duration,
    state: Mutex<OrdersViewState>,
}

impl OrdersView {
    pub fn new(api: Arc<dyn DashboardApi>, refresh_every: Duration) -> Self {
        Self {
            store: OrderStore::new(Arc::clone(&api)),
            api,
            refresh_every,
            state: Mutex::new(OrdersViewState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OrdersViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Load the orders and start the background refresh
    pub async fn activate(&self) {
        let _ = self.store.load().await;
        let mut state = self.lock();
        if state.poller.as_ref().is_none_or(|p| !p.is_running()) {
            state.poller = Some(Poller::spawn(self.store.clone(), self.refresh_every));
            tracing::info!(every = ?self.refresh_every, "orders view activated");
        }
    }

    /// Stop the background refresh
    pub async fn deactivate(&self) {
        let poller = self.lock().poller.take();
        if let Some(poller) = poller {
            poller.stop().await;
            tracing::info!("orders view deactivated");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.lock().poller.as_ref().is_some_and(Poller::is_running)
    }

    /// Reload now, outside the refresh schedule
    pub async fn refresh(&self) {
        let _ = self.store.load().await;
    }

    /// Statuses offered by the filter bar, in workflow order
    pub fn status_options(&self) -> &'static [OrderStatus] {
        &OrderStatus::ALL
    }

    pub fn selected_status(&self) -> Filter<OrderStatus> {
        self.lock().selected_status
    }

    pub fn select_status(&self, filter: Filter<OrderStatus>) {
        self.lock().selected_status = filter;
        self.store.set_filter(filter);
    }

    /// Orders passing the selected status
    pub fn orders(&self) -> Vec<Order> {
        self.store.filtered()
    }

    /// Set an order's status; returns whether the backend accepted it
    pub async fn change_status(&self, id: RecordId, status: OrderStatus) -> bool {
        self.store.update_status(id, status).await.is_ok()
    }

    /// Delete an order; the caller is responsible for asking confirmation
    pub async fn delete_order(&self, id: RecordId) -> bool {
        self.store.delete(id).await.is_ok()
    }

    /// Fetch one order with its items, for a detail panel
    pub async fn order_details(&self, id: RecordId) -> ApiResult<Order> {
        self.api.get_order(id).await
    }

    /// Message to display, if the last operation failed
    pub fn error(&self) -> Option<String> {
        self.store.error()
    }
}
