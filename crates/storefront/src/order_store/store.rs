use super::{OrderAction, OrderContext, OrderError, OrderState};
use crate::model::{NewOrder, Order};
use async_trait::async_trait;
use store_framework::{StateCell, StoreState};
use tracing::{info, warn};

pub const ORDER_PLACED: &str = "Order placed";
pub const ORDER_FAILED: &str = "Could not place your order";

#[async_trait]
impl StoreState for OrderState {
    type Action = OrderAction;
    type ActionResult = Vec<Order>;
    type Context = OrderContext;
    type Error = OrderError;

    async fn handle_action(
        cell: &StateCell<Self>,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<Vec<Order>, OrderError> {
        match action {
            OrderAction::Fetch { token } => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let page = ctx.api.orders(&token).await.map_err(|e| {
                    warn!(error = %e, "Order history fetch failed");
                    e
                })?;
                cell.update(|s| s.orders.clone_from(&page.results));
            }

            OrderAction::Create {
                shipping_address,
                token,
            } => {
                let shipping_address = shipping_address.trim().to_string();
                if shipping_address.is_empty() {
                    ctx.notifier.warning("Please enter a shipping address");
                    return Err(OrderError::EmptyShippingAddress);
                }

                let _loading = cell.begin_loading(|s| &mut s.loading);
                let order = ctx
                    .api
                    .create_order(&token, &NewOrder { shipping_address })
                    .await
                    .map_err(|e| {
                        let message = e
                            .error_message()
                            .or_else(|| e.first_validation_message())
                            .unwrap_or_else(|| ORDER_FAILED.to_string());
                        warn!(error = %e, %message, "Order rejected");
                        ctx.notifier.error(&message);
                        e
                    })?;
                info!(order = %order.id, total = %order.total_amount, "Order placed");
                ctx.notifier.success(ORDER_PLACED);
                cell.update(|s| s.orders = vec![order]);
            }

            OrderAction::Discard => cell.replace(OrderState::default()),
        }
        Ok(cell.read(|s| s.orders.clone()))
    }
}
