use super::{CartAction, CartContext, CartError, CartState};
use crate::api::ApiError;
use crate::model::{AccessToken, Cart};
use async_trait::async_trait;
use store_framework::{StateCell, StoreState};
use tracing::{debug, warn};

pub const ADDED: &str = "Product added to cart";
pub const ADD_FAILED: &str = "Could not add the product to your cart";
pub const CLEARED: &str = "Cart cleared";
pub const CLEAR_FAILED: &str = "Could not clear your cart";

#[async_trait]
impl StoreState for CartState {
    type Action = CartAction;
    type ActionResult = Option<Cart>;
    type Context = CartContext;
    type Error = CartError;

    async fn handle_action(
        cell: &StateCell<Self>,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<Option<Cart>, CartError> {
        match action {
            CartAction::Fetch { token } => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                reconcile(cell, ctx, &token).await?;
            }

            CartAction::Add { product_id, token } => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                ctx.api
                    .add_to_cart(&token, product_id, 1)
                    .await
                    .map_err(|e| report(ctx, e, ADD_FAILED))?;
                ctx.notifier.success(ADDED);
                reconcile(cell, ctx, &token).await?;
            }

            CartAction::Clear { token } => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let user = cell.read(|s| s.cart.as_ref().map(|c| c.user_id));
                ctx.api
                    .clear_cart(&token, user)
                    .await
                    .map_err(|e| report(ctx, e, CLEAR_FAILED))?;
                ctx.notifier.success(CLEARED);
                reconcile(cell, ctx, &token).await?;
            }

            CartAction::UpdateQuantity {
                item_id,
                quantity,
                token,
            } => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let cart = ctx
                    .api
                    .update_cart_item(&token, item_id, quantity)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, item = %item_id, quantity, "Quantity update failed");
                        e
                    })?;
                cell.update(|s| s.cart = Some(cart));
            }

            CartAction::RemoveItem { item_id, token } => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let cart = ctx
                    .api
                    .remove_cart_item(&token, item_id)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, item = %item_id, "Item removal failed");
                        e
                    })?;
                cell.update(|s| s.cart = Some(cart));
            }

            CartAction::Discard => cell.replace(CartState::default()),
        }
        Ok(cell.read(|s| s.cart.clone()))
    }
}

/// Replaces the local cart with the server's.
async fn reconcile(
    cell: &StateCell<CartState>,
    ctx: &CartContext,
    token: &AccessToken,
) -> Result<(), CartError> {
    let cart = ctx.api.cart(token).await.map_err(|e| {
        warn!(error = %e, "Cart fetch failed");
        e
    })?;
    debug!(items = cart.items.len(), total = %cart.total_amount, "Cart loaded");
    cell.update(|s| s.cart = Some(cart));
    Ok(())
}

fn report(ctx: &CartContext, error: ApiError, fallback: &str) -> ApiError {
    let message = error
        .error_message()
        .or_else(|| error.first_validation_message())
        .unwrap_or_else(|| fallback.to_string());
    warn!(error = %error, %message, "Cart update rejected");
    ctx.notifier.error(&message);
    error
}
