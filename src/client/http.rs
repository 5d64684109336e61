//! `reqwest`-based [`DashboardApi`] implementation

use crate::config::ApiConfig;
use crate::core::{
    Acknowledgement, ApiError, ApiResult, Category, CategoryPayload, ConfigError, DashboardApi,
    Order, OrderStatus, Product, ProductPayload, RecordId, StatusPayload,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client for the restaurant backend's REST API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "api".to_string(),
                value: config.base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self::with_client(http, &config.base_url))
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, self.request(Method::GET, path))
            .await
    }

    async fn delete(&self, path: &str) -> ApiResult<Acknowledgement> {
        self.execute(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<Acknowledgement> {
        let request = self.request(method.clone(), path).json(body);
        self.execute(method, path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        tracing::debug!(%method, path, "sending request");

        let transport = |e: reqwest::Error| ApiError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;

        tracing::debug!(%method, path, status = status.as_u16(), "received response");

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Rejected {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Extract a readable message from an error response
///
/// The backend answers `{"error": "..."}`; anything else falls back to the raw
/// body, then to the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    } else {
        text.to_string()
    }
}

#[async_trait]
impl DashboardApi for HttpApiClient {
    async fn health(&self) -> ApiResult<()> {
        let _: serde_json::Value = self.get("/health").await?;
        Ok(())
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get("/categories").await
    }

    async fn get_category(&self, id: RecordId) -> ApiResult<Category> {
        self.get(&format!("/categories/{}", id)).await
    }

    async fn create_category(&self, payload: &CategoryPayload) -> ApiResult<Acknowledgement> {
        self.send_json(Method::POST, "/categories", payload).await
    }

    async fn update_category(
        &self,
        id: RecordId,
        payload: &CategoryPayload,
    ) -> ApiResult<Acknowledgement> {
        self.send_json(Method::PUT, &format!("/categories/{}", id), payload)
            .await
    }

    async fn delete_category(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        self.delete(&format!("/categories/{}", id)).await
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.get("/products").await
    }

    async fn list_products_by_category(&self, category_id: RecordId) -> ApiResult<Vec<Product>> {
        self.get(&format!("/products/category/{}", category_id))
            .await
    }

    async fn get_product(&self, id: RecordId) -> ApiResult<Product> {
        self.get(&format!("/products/{}", id)).await
    }

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Acknowledgement> {
        self.send_json(Method::POST, "/products", payload).await
    }

    async fn update_product(
        &self,
        id: RecordId,
        payload: &ProductPayload,
    ) -> ApiResult<Acknowledgement> {
        self.send_json(Method::PUT, &format!("/products/{}", id), payload)
            .await
    }

    async fn delete_product(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        self.delete(&format!("/products/{}", id)).await
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        self.get("/orders").await
    }

    async fn get_order(&self, id: RecordId) -> ApiResult<Order> {
        self.get(&format!("/orders/{}", id)).await
    }

    async fn update_order_status(
        &self,
        id: RecordId,
        status: OrderStatus,
    ) -> ApiResult<Acknowledgement> {
        self.send_json(
            Method::PUT,
            &format!("/orders/{}/status", id),
            &StatusPayload { status },
        )
        .await
    }

    async fn delete_order(&self, id: RecordId) -> ApiResult<Acknowledgement> {
        self.delete(&format!("/orders/{}", id)).await
    }
}
