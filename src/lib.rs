//! # Tavola
//!
//! State and request layer of a restaurant back-office dashboard: menu
//! categories, products and orders managed against a REST backend.
//!
//! ## Layers
//!
//! - **Models** ([`core::model`]): plain data shapes exchanged with the backend
//! - **API** ([`core::service::DashboardApi`]): one async method per backend
//!   operation, implemented over HTTP by [`client::HttpApiClient`] and in
//!   process by [`storage::InMemoryApi`]
//! - **Stores** ([`store`]): the authoritative list per record type, its
//!   filter and filtered view, and the mutations that resynchronize it
//! - **Forms** ([`forms`]): drafts being created or edited, validated before
//!   submission
//! - **Views** ([`views`]): coordinators wiring user actions to stores and forms
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tavola::prelude::*;
//!
//! let config = TavolaConfig::from_yaml_file("tavola.yaml")?;
//! let api: Arc<dyn DashboardApi> = Arc::new(HttpApiClient::new(&config.api)?);
//!
//! let mut dashboard = Dashboard::new(api, &config);
//! dashboard.start().await; // loads orders and refreshes them every 5s
//!
//! dashboard.orders().select_status(Filter::Only(OrderStatus::Pending));
//! dashboard.orders().change_status(5, OrderStatus::Ready).await;
//!
//! dashboard.switch_tab(Tab::Menu).await; // stops the order refresh
//! let menu = dashboard.menu();
//! menu.open_product_form(None);
//! menu.product_form().edit(|draft| {
//!     draft.name = "Margherita".to_string();
//!     draft.price = 8.0;
//! });
//! menu.save_product().await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod forms;
pub mod storage;
pub mod store;
pub mod views;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Acknowledgement, ApiError, ApiResult, Category, CategoryPayload, ConfigError,
        DashboardApi, FieldValidationError, Filter, Filterable, FormError, Order, OrderItem,
        OrderStatus, Product, ProductPayload, RecordId, TavolaError, ValidationError,
        filtered_view,
    };

    // === Stores ===
    pub use crate::store::{
        CategoryStore, CollectionStore, Editable, OrderStore, Poller, ProductStore, Record,
    };

    // === Forms ===
    pub use crate::forms::{
        CategoryDraft, CategoryForm, Draft, FormContext, FormController, FormMode, ProductDraft,
        ProductForm,
    };

    // === Views ===
    pub use crate::views::{Dashboard, MenuView, OrdersView, Tab};

    // === Backends ===
    pub use crate::client::HttpApiClient;
    pub use crate::storage::InMemoryApi;

    // === Config ===
    pub use crate::config::{ApiConfig, OrdersConfig, TavolaConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
