use crate::model::{AccessToken, CartItemId, ProductId};

/// Cart actions. Every action resolves to the cart held once it finished.
#[derive(Debug, Clone)]
pub enum CartAction {
    Fetch { token: AccessToken },
    /// Adds one unit of `product_id`.
    Add {
        product_id: ProductId,
        token: AccessToken,
    },
    Clear { token: AccessToken },
    UpdateQuantity {
        item_id: CartItemId,
        quantity: u32,
        token: AccessToken,
    },
    RemoveItem {
        item_id: CartItemId,
        token: AccessToken,
    },
    /// Forgets the local cart without any request.
    Discard,
}
