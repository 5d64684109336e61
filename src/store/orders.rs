//! Order-specific store operations

use super::CollectionStore;
use crate::core::{ApiResult, Order, OrderStatus, RecordId};
use std::sync::atomic::Ordering;

impl CollectionStore<Order> {
    /// Change the status of an order
    ///
    /// On success the local order is patched in place and the filtered view
    /// recomputed; no reload is issued. Loads still in flight were answered
    /// before the change and are discarded when they return.
    pub async fn update_status(&self, id: RecordId, status: OrderStatus) -> ApiResult<()> {
        match self.api.update_order_status(id, status).await {
            Ok(_) => {
                tracing::info!(id, %status, "order status updated");
                self.issued.fetch_add(1, Ordering::SeqCst);
                self.mutate(|state| {
                    if let Some(order) = state.items.iter_mut().find(|o| o.id == id) {
                        order.status = status;
                    }
                    state.refilter();
                    // No load holds the latest token anymore
                    state.loading = false;
                    state.error = None;
                });
                Ok(())
            }
            Err(err) => {
                self.fail(format!("Error updating order {}: {}", id, err), &err);
                Err(err)
            }
        }
    }

    /// Number of orders per status, over the full list
    pub fn status_counts(&self) -> Vec<(OrderStatus, usize)> {
        self.read(|state| {
            OrderStatus::ALL
                .into_iter()
                .map(|status| {
                    let count = state.items.iter().filter(|o| o.status == status).count();
                    (status, count)
                })
                .collect()
        })
    }
}
