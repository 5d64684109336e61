//! Core module containing the domain models, the backend contract and the
//! shared error, filter and validation types

pub mod error;
pub mod filter;
pub mod model;
pub mod service;
pub mod timestamp;
pub mod validation;

pub use error::{
    ApiError, ApiResult, ConfigError, FieldValidationError, FormError, TavolaError,
    ValidationError,
};
pub use filter::{Filter, Filterable, filtered_view};
pub use model::{
    Acknowledgement, Category, CategoryPayload, Order, OrderItem, OrderStatus, Product,
    ProductPayload, RecordId, StatusPayload,
};
pub use service::DashboardApi;
