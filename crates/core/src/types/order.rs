//! Order and order item entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompanyId, OrderId, OrderItemId, OrderStatus, Price, ProductId};

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub company_id: CompanyId,
    /// Human-facing order number (e.g., "ORD-00042817").
    pub order_number: String,
    pub customer_email: String,
    pub status: OrderStatus,
    pub total: Price,
    /// When the customer placed the order; the date the trend aggregation
    /// buckets on.
    pub placed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Price,
}
