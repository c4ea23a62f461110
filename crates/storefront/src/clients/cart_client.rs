//! # Cart Client
//!
//! High-level API for the cart store.
use crate::cart_store::{CartAction, CartError, CartState};
use crate::model::{AccessToken, Cart, CartItemId, ProductId};
use store_framework::{StoreClient, StoreHandle};
use tracing::instrument;

#[derive(Clone)]
pub struct CartClient {
    inner: StoreClient<CartState>,
}

impl CartClient {
    pub fn new(inner: StoreClient<CartState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, token))]
    pub async fn fetch(&self, token: AccessToken) -> Result<Option<Cart>, CartError> {
        self.inner.dispatch(CartAction::Fetch { token }).await
    }

    /// Adds one unit of `product_id`, then reloads the cart.
    #[instrument(skip(self, token))]
    pub async fn add(
        &self,
        product_id: ProductId,
        token: AccessToken,
    ) -> Result<Option<Cart>, CartError> {
        self.inner
            .dispatch(CartAction::Add { product_id, token })
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn clear(&self, token: AccessToken) -> Result<Option<Cart>, CartError> {
        self.inner.dispatch(CartAction::Clear { token }).await
    }

    #[instrument(skip(self, token))]
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
        token: AccessToken,
    ) -> Result<Option<Cart>, CartError> {
        self.inner
            .dispatch(CartAction::UpdateQuantity {
                item_id,
                quantity,
                token,
            })
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn remove_item(
        &self,
        item_id: CartItemId,
        token: AccessToken,
    ) -> Result<Option<Cart>, CartError> {
        self.inner
            .dispatch(CartAction::RemoveItem { item_id, token })
            .await
    }

    pub async fn discard(&self) -> Result<(), CartError> {
        self.inner.dispatch(CartAction::Discard).await.map(|_| ())
    }
}

impl StoreHandle<CartState> for CartClient {
    fn inner(&self) -> &StoreClient<CartState> {
        &self.inner
    }
}
