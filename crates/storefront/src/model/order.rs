use crate::model::{ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

/// A placed order, built by the server from the cart at checkout time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_email: String,
    pub user_name: String,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Checkout request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub shipping_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_lowercase_wire_names() {
        let order: Order =
            serde_json::from_str(r#"{"id": 4, "status": "shipped", "total_amount": "9.99"}"#)
                .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.id, OrderId(4));
        assert_eq!(
            serde_json::to_value(OrderStatus::Cancelled).unwrap(),
            "cancelled"
        );
    }
}
