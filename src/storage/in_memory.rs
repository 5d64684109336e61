//! In-memory implementation of DashboardApi for testing and development

use crate::core::{
    Acknowledgement, ApiError, ApiResult, Category, CategoryPayload, DashboardApi, Order,
    OrderItem, OrderStatus, Product, ProductPayload, RecordId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
    orders: Vec<Order>,
    last_id: RecordId,
}

impl Tables {
    fn next_id(&mut self) -> RecordId {
        self.last_id += 1;
        self.last_id
    }

    fn category_name(&self, id: RecordId) -> Option<String> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }
}

/// In-memory backend
///
/// Behaves like the REST backend: ids are assigned on create, lists come back
/// in insertion order, missing ids answer `NotFound`, blank names are rejected
/// with a 400. Deleting a category leaves its products in place.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryApi {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a category as is, keeping its id
    pub fn seed_category(&self, category: Category) {
        let mut tables = self.write();
        tables.last_id = tables.last_id.max(category.id);
        tables.categories.push(category);
    }

    /// Insert a product as is, keeping its id
    pub fn seed_product(&self, product: Product) {
        let mut tables = self.write();
        tables.last_id = tables.last_id.max(product.id);
        tables.products.push(product);
    }

    /// Insert an order the way the ordering front-end would
    ///
    /// The order number follows the highest existing one and the total is the
    /// sum of the item subtotals.
    pub fn seed_order(&self, items: Vec<OrderItem>) -> Order {
        let mut tables = self.write();
        let id = tables.next_id();
        let order_number = tables
            .orders
            .iter()
            .map(|o| o.order_number)
            .max()
            .unwrap_or(0)
            + 1;
        let now = Utc::now();
        let order = Order {
            id,
            order_number,
            status: OrderStatus::Pending,
            total_price: items.iter().map(OrderItem::subtotal).sum(),
            created_at: Some(now),
            updated_at: Some(now),
            items: Some(items),
        };
        tables.orders.push(order.clone());
        order
    }
}

fn not_found(path: String) -> ApiError {
    ApiError::NotFound { path }
}

fn bad_request(method: &str, path: &str, message: &str) -> ApiError {
    ApiError::Rejected {
        method: method.to_string(),
        path: path.to_string(),
        status: 400,
        message: message.to_string(),
    }
}

fn check_category(method: &str, path: &str, payload: &CategoryPayload) -> ApiResult<()> {
    if payload.name.trim().is_empty() {
        return Err(bad_request(method, path, "Missing required field: name"));
    }
    Ok(())
}

fn check_product(method: &str, path: &str, payload: &ProductPayload) -> ApiResult<()> {
    if payload.name.trim().is_empty() {
        return Err(bad_request(
            method,
            path,
            "Missing required fields: name, price, category_id",
        ));
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[async_trait]
impl DashboardApi for InMemoryApi {
    async fn health(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.read().categories.clone())
    }

    async fn get_category(&self, id: RecordId) -> ApiResult<Category> {
        self.read()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("/categories/{}", id)))
    }

    async fn create_category(&self, payload: &CategoryPayload) -> ApiResult<Acknowledgement> {
        check_category("POST", "/categories", payload)?;
        let mut tables = self.write();
        let id = tables.next_id();
        tables.categories.push(Category {
            id,
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
        });
        Ok(Acknowledgement::created(id, "Category created successfully"))
    }

    async fn update_category(
        &self,
        id: RecordId,
        payload: &CategoryPayload,
    ) -> ApiResult<Acknowledgement> {
        let path = format!("/categories/{}", id);
        check_category("PUT", &path, payload)?;
        let mut tables = self.write();
        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(path))?;
        category.name = payload.name.clone();
        category.description = Some(payload.description.clone());
        Ok(Acknowledgement::message("Category updated successfully"))
    }

    async fn delete_category(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        let mut tables = self.write();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(not_found(format!("/categories/{}", id)));
        }
        Ok(Acknowledgement::message("Category deleted successfully"))
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let tables = self.read();
        Ok(tables
            .products
            .iter()
            .map(|p| Product {
                category_name: tables.category_name(p.category_id),
                ..p.clone()
            })
            .collect())
    }

    async fn list_products_by_category(&self, category_id: RecordId) -> ApiResult<Vec<Product>> {
        Ok(self
            .read()
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: RecordId) -> ApiResult<Product> {
        self.read()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("/products/{}", id)))
    }

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Acknowledgement> {
        check_product("POST", "/products", payload)?;
        let mut tables = self.write();
        let id = tables.next_id();
        tables.products.push(Product {
            id,
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            price: payload.price,
            category_id: payload.category_id,
            image_url: non_empty(&payload.image_url),
            category_name: None,
        });
        Ok(Acknowledgement::created(id, "Product created successfully"))
    }

    async fn update_product(
        &self,
        id: RecordId,
        payload: &ProductPayload,
    ) -> ApiResult<Acknowledgement> {
        let path = format!("/products/{}", id);
        check_product("PUT", &path, payload)?;
        let mut tables = self.write();
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(path))?;
        product.name = payload.name.clone();
        product.description = Some(payload.description.clone());
        product.price = payload.price;
        product.category_id = payload.category_id;
        product.image_url = non_empty(&payload.image_url);
        Ok(Acknowledgement::message("Product updated successfully"))
    }

    async fn delete_product(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        let mut tables = self.write();
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(not_found(format!("/products/{}", id)));
        }
        Ok(Acknowledgement::message("Product deleted successfully"))
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        // Newest first, like the backend's ORDER BY created_at DESC
        Ok(self.read().orders.iter().rev().cloned().collect())
    }

    async fn get_order(&self, id: RecordId) -> ApiResult<Order> {
        self.read()
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("/orders/{}", id)))
    }

    async fn update_order_status(
        &self,
        id: RecordId,
        status: OrderStatus,
    ) -> ApiResult<Acknowledgement> {
        let mut tables = self.write();
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found(format!("/orders/{}/status", id)))?;
        order.status = status;
        order.updated_at = Some(Utc::now());
        Ok(Acknowledgement::message("Order status updated successfully"))
    }

    async fn delete_order(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        let mut tables = self.write();
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        if tables.orders.len() == before {
            return Err(not_found(format!("/orders/{}", id)));
        }
        Ok(Acknowledgement::message("Order deleted successfully"))
    }
}
