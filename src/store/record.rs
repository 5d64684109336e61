//! Binding between record types and the backend operations that load and
//! mutate them

use crate::core::{
    Acknowledgement, ApiResult, Category, CategoryPayload, DashboardApi, Filterable, Order,
    OrderStatus, Product, ProductPayload, RecordId,
};
use async_trait::async_trait;

/// A record type a [`CollectionStore`](super::CollectionStore) can hold
#[async_trait]
pub trait Record: Filterable + Clone + Send + Sync + 'static {
    /// The plural resource name used in paths and logs (e.g. "categories")
    const RESOURCE: &'static str;

    /// The singular resource name (e.g. "category")
    const SINGULAR: &'static str;

    fn id(&self) -> RecordId;

    /// Fetch the full current list
    async fn fetch_all(api: &dyn DashboardApi) -> ApiResult<Vec<Self>>;

    /// Delete one record
    async fn remove(api: &dyn DashboardApi, id: RecordId) -> ApiResult<Acknowledgement>;
}

/// A record type the dashboard can create and update
#[async_trait]
pub trait Editable: Record {
    /// Request body of create/update
    type Payload: Send + Sync;

    async fn create(
        api: &dyn DashboardApi,
        payload: &Self::Payload,
    ) -> ApiResult<Acknowledgement>;

    async fn update(
        api: &dyn DashboardApi,
        id: RecordId,
        payload: &Self::Payload,
    ) -> ApiResult<Acknowledgement>;
}

// === Categories ===

impl Filterable for Category {
    type Key = RecordId;

    fn discriminant(&self) -> RecordId {
        self.id
    }
}

#[async_trait]
impl Record for Category {
    const RESOURCE: &'static str = "categories";
    const SINGULAR: &'static str = "category";

    fn id(&self) -> RecordId {
        self.id
    }

    async fn fetch_all(api: &dyn DashboardApi) -> ApiResult<Vec<Self>> {
        api.list_categories().await
    }

    async fn remove(api: &dyn DashboardApi, id: RecordId) -> ApiResult<Acknowledgement> {
        api.delete_category(id).await
    }
}

#[async_trait]
impl Editable for Category {
    type Payload = CategoryPayload;

    async fn create(
        api: &dyn DashboardApi,
        payload: &CategoryPayload,
    ) -> ApiResult<Acknowledgement> {
        api.create_category(payload).await
    }

    async fn update(
        api: &dyn DashboardApi,
        id: RecordId,
        payload: &CategoryPayload,
    ) -> ApiResult<Acknowledgement> {
        api.update_category(id, payload).await
    }
}

// === Products ===

impl Filterable for Product {
    type Key = RecordId;

    fn discriminant(&self) -> RecordId {
        self.category_id
    }
}

#[async_trait]
impl Record for Product {
    const RESOURCE: &'static str = "products";
    const SINGULAR: &'static str = "product";

    fn id(&self) -> RecordId {
        self.id
    }

    async fn fetch_all(api: &dyn DashboardApi) -> ApiResult<Vec<Self>> {
        api.list_products().await
    }

    async fn remove(api: &dyn DashboardApi, id: RecordId) -> ApiResult<Acknowledgement> {
        api.delete_product(id).await
    }
}

#[async_trait]
impl Editable for Product {
    type Payload = ProductPayload;

    async fn create(api: &dyn DashboardApi, payload: &ProductPayload) -> ApiResult<Acknowledgement> {
        api.create_product(payload).await
    }

    async fn update(
        api: &dyn DashboardApi,
        id: RecordId,
        payload: &ProductPayload,
    ) -> ApiResult<Acknowledgement> {
        api.update_product(id, payload).await
    }
}

// === Orders ===

impl Filterable for Order {
    type Key = OrderStatus;

    fn discriminant(&self) -> OrderStatus {
        self.status
    }
}

#[async_trait]
impl Record for Order {
    const RESOURCE: &'static str = "orders";
    const SINGULAR: &'static str = "order";

    fn id(&self) -> RecordId {
        self.id
    }

    async fn fetch_all(api: &dyn DashboardApi) -> ApiResult<Vec<Self>> {
        api.list_orders().await
    }

    async fn remove(api: &dyn DashboardApi, id: RecordId) -> ApiResult<Acknowledgement> {
        api.delete_order(id).await
    }
}
