use crate::model::{ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for cart lines. The update and delete endpoints route on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(pub u64);

impl From<u64> for CartItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// The server's view of the user's cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    pub id: u64,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub total_amount: Decimal,
    pub total_items: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cart {
    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_info: Option<ProductInfo>,
    pub subtotal: Decimal,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Live catalog data attached to a cart line; absent when the catalog was unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfo {
    pub name: Option<String>,
    pub current_price: Option<Decimal>,
    pub is_active: Option<bool>,
    pub stock_quantity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_decodes_server_payload() {
        let cart: Cart = serde_json::from_str(
            r#"{
                "id": 1, "user_id": 7, "total_amount": "25.00", "total_items": 2,
                "items": [{"id": 11, "product_id": 3, "quantity": 2, "product_name": "Mug",
                           "product_price": "12.50", "subtotal": "25.00", "product_info": null}]
            }"#,
        )
        .unwrap();

        assert_eq!(cart.user_id, UserId(7));
        assert_eq!(cart.total_amount, Decimal::new(2500, 2));
        let item = cart.item(CartItemId(11)).unwrap();
        assert_eq!(item.product_id, ProductId(3));
        assert!(item.product_info.is_none());
    }
}
