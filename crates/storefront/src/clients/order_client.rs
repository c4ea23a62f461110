//! # Order Client
//!
//! High-level API for the order store.
use crate::model::{AccessToken, Order};
use crate::order_store::{OrderAction, OrderError, OrderState};
use store_framework::{StoreClient, StoreHandle};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<OrderState>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<OrderState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, token))]
    pub async fn fetch_orders(&self, token: AccessToken) -> Result<Vec<Order>, OrderError> {
        self.inner.dispatch(OrderAction::Fetch { token }).await
    }

    /// Places an order for the current server-side cart.
    ///
    /// Returns the created order, which is also the only one held by the store afterwards.
    #[instrument(skip(self, token))]
    pub async fn create_order(
        &self,
        shipping_address: &str,
        token: AccessToken,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .dispatch(OrderAction::Create {
                shipping_address: shipping_address.to_string(),
                token,
            })
            .await?;
        match orders.pop() {
            Some(order) => Ok(order),
            None => unreachable!("Create must leave the created order in the list"),
        }
    }

    pub async fn discard(&self) -> Result<(), OrderError> {
        self.inner.dispatch(OrderAction::Discard).await.map(|_| ())
    }
}

impl StoreHandle<OrderState> for OrderClient {
    fn inner(&self) -> &StoreClient<OrderState> {
        &self.inner
    }
}
