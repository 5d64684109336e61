//! Shared test harness for store, form and view tests
//!
//! Provides `ScriptedApi`, a `DashboardApi` over an `InMemoryApi` that records
//! every call and can be told to fail or stall specific operations, plus
//! fixtures for the menu and orders.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tavola::prelude::*;

// ---------------------------------------------------------------------------
// ScriptedApi
// ---------------------------------------------------------------------------

/// API double recording calls by operation name
///
/// Operation names are the `DashboardApi` method names ("list_orders",
/// "create_category", ...).
#[derive(Default)]
pub struct ScriptedApi {
    pub backend: InMemoryApi,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
    delays: Mutex<HashMap<&'static str, VecDeque<Duration>>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make every following call of `op` fail with a transport error
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
    }

    /// Delay the response of the next call of `op`
    ///
    /// The backend is read before the delay, so the delayed call answers
    /// with the data as it was when the request was issued.
    pub fn delay_next(&self, op: &'static str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(delay);
    }

    fn enter(&self, op: &'static str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(op) {
            return Err(ApiError::Transport {
                method: "TEST".to_string(),
                path: op.to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    async fn settle(&self, op: &'static str) {
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(op)
            .and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

macro_rules! scripted {
    ($self:ident, $op:literal, $call:expr) => {{
        $self.enter($op)?;
        let result = $call.await;
        $self.settle($op).await;
        result
    }};
}

#[async_trait]
impl DashboardApi for ScriptedApi {
    async fn health(&self) -> ApiResult<()> {
        scripted!(self, "health", self.backend.health())
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        scripted!(self, "list_categories", self.backend.list_categories())
    }

    async fn get_category(&self, id: RecordId) -> ApiResult<Category> {
        scripted!(self, "get_category", self.backend.get_category(id))
    }

    async fn create_category(&self, payload: &CategoryPayload) -> ApiResult<Acknowledgement> {
        scripted!(self, "create_category", self.backend.create_category(payload))
    }

    async fn update_category(
        &self,
        id: RecordId,
        payload: &CategoryPayload,
    ) -> ApiResult<Acknowledgement> {
        scripted!(self, "update_category", self.backend.update_category(id, payload))
    }

    async fn delete_category(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        scripted!(self, "delete_category", self.backend.delete_category(id))
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        scripted!(self, "list_products", self.backend.list_products())
    }

    async fn list_products_by_category(&self, category_id: RecordId) -> ApiResult<Vec<Product>> {
        scripted!(
            self,
            "list_products_by_category",
            self.backend.list_products_by_category(category_id)
        )
    }

    async fn get_product(&self, id: RecordId) -> ApiResult<Product> {
        scripted!(self, "get_product", self.backend.get_product(id))
    }

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Acknowledgement> {
        scripted!(self, "create_product", self.backend.create_product(payload))
    }

    async fn update_product(
        &self,
        id: RecordId,
        payload: &ProductPayload,
    ) -> ApiResult<Acknowledgement> {
        scripted!(self, "update_product", self.backend.update_product(id, payload))
    }

    async fn delete_product(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        scripted!(self, "delete_product", self.backend.delete_product(id))
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        scripted!(self, "list_orders", self.backend.list_orders())
    }

    async fn get_order(&self, id: RecordId) -> ApiResult<Order> {
        scripted!(self, "get_order", self.backend.get_order(id))
    }

    async fn update_order_status(
        &self,
        id: RecordId,
        status: OrderStatus,
    ) -> ApiResult<Acknowledgement> {
        scripted!(
            self,
            "update_order_status",
            self.backend.update_order_status(id, status)
        )
    }

    async fn delete_order(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        scripted!(self, "delete_order", self.backend.delete_order(id))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn category(id: RecordId, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: None,
    }
}

pub fn product(id: RecordId, category_id: RecordId, name: &str, price: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: None,
        price,
        category_id,
        image_url: None,
        category_name: None,
    }
}

pub fn item(product_id: RecordId, quantity: u32, unit_price: f64) -> OrderItem {
    OrderItem {
        id: product_id * 100,
        product_id,
        quantity,
        unit_price,
        name: None,
        description: None,
    }
}

/// Pizza (1) with Margherita (10), Bevande (2) with Acqua (20)
pub fn seed_menu(api: &ScriptedApi) {
    api.backend.seed_category(category(1, "Pizza"));
    api.backend.seed_category(category(2, "Bevande"));
    api.backend.seed_product(product(10, 1, "Margherita", 8.0));
    api.backend.seed_product(product(20, 2, "Acqua", 1.5));
}

/// Coerce to the trait object the stores take
pub fn as_api(api: &Arc<ScriptedApi>) -> Arc<dyn DashboardApi> {
    Arc::clone(api) as Arc<dyn DashboardApi>
}
