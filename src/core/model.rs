//! Domain models exchanged with the backend
//!
//! These are plain data shapes. The only behavior they carry is presentation
//! helpers on [`OrderStatus`] and a few derived totals on orders.

use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned record identifier
pub type RecordId = i64;

/// A menu category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A menu product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Joined by the list endpoint; never sent back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

/// Lifecycle status of an order
///
/// Transitions are unconstrained: any status can be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in workflow order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Badge colour as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "#ff9800",
            OrderStatus::Preparing => "#2196f3",
            OrderStatus::Ready => "#4caf50",
            OrderStatus::Completed => "#9c27b0",
            OrderStatus::Cancelled => "#f44336",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status '{}'", s))
    }
}

/// A line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: RecordId,
    pub product_id: RecordId,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// A customer order. Orders are created outside the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    pub order_number: i64,
    pub status: OrderStatus,
    pub total_price: f64,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
}

impl Order {
    /// Total number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|item| item.quantity)
            .sum()
    }
}

// =============================================================================
// Request / response bodies
// =============================================================================

/// Body of category create/update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
}

/// Body of product create/update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: RecordId,
    pub image_url: String,
}

/// Body of the order status update request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: OrderStatus,
}

/// What mutation endpoints answer with
///
/// Creates return the new id, every mutation returns a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Acknowledgement {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            id: None,
            message: Some(message.into()),
        }
    }

    pub fn created(id: RecordId, message: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            message: Some(message.into()),
        }
    }
}
