//! Service trait for the backend operations the dashboard consumes

use crate::core::error::ApiResult;
use crate::core::model::{
    Acknowledgement, Category, CategoryPayload, Order, OrderStatus, Product, ProductPayload,
    RecordId,
};
use async_trait::async_trait;

/// The REST surface of the restaurant backend
///
/// Implementations map each operation to one request and hold no state of
/// their own: no retries, no caching. [`HttpApiClient`](crate::client::HttpApiClient)
/// talks to the real backend, [`InMemoryApi`](crate::storage::InMemoryApi) is an
/// in-process stand-in for development and tests.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> ApiResult<()>;

    // === Categories ===

    /// `GET /categories`
    async fn list_categories(&self) -> ApiResult<Vec<Category>>;

    /// `GET /categories/{id}`
    async fn get_category(&self, id: RecordId) -> ApiResult<Category>;

    /// `POST /categories`
    async fn create_category(&self, payload: &CategoryPayload) -> ApiResult<Acknowledgement>;

    /// `PUT /categories/{id}`
    async fn update_category(
        &self,
        id: RecordId,
        payload: &CategoryPayload,
    ) -> ApiResult<Acknowledgement>;

    /// `DELETE /categories/{id}`
    async fn delete_category(&self, id: RecordId) -> ApiResult<Acknowledgement>;

    // === Products ===

    /// `GET /products`
    async fn list_products(&self) -> ApiResult<Vec<Product>>;

    /// `GET /products/category/{id}`
    async fn list_products_by_category(&self, category_id: RecordId) -> ApiResult<Vec<Product>>;

    /// `GET /products/{id}`
    async fn get_product(&self, id: RecordId) -> ApiResult<Product>;

    /// `POST /products`
    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Acknowledgement>;

    /// `PUT /products/{id}`
    async fn update_product(
        &self,
        id: RecordId,
        payload: &ProductPayload,
    ) -> ApiResult<Acknowledgement>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, id: RecordId) -> ApiResult<Acknowledgement>;

    // === Orders ===

    /// `GET /orders`
    async fn list_orders(&self) -> ApiResult<Vec<Order>>;

    /// `GET /orders/{id}`
    async fn get_order(&self, id: RecordId) -> ApiResult<Order>;

    /// `PUT /orders/{id}/status`
    async fn update_order_status(
        &self,
        id: RecordId,
        status: OrderStatus,
    ) -> ApiResult<Acknowledgement>;

    /// `DELETE /orders/{id}`
    async fn delete_order(&self, id: RecordId) -> ApiResult<Acknowledgement>;
}
