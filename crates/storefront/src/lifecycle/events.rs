use crate::cart_store::CartAction;
use crate::clients::{CartClient, OrderClient};
use crate::order_store::OrderAction;
use crate::session_store::SessionEvent;
use store_framework::StoreHandle;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

/// Forwards session events to the cart and order stores until the event bus closes.
pub async fn relay_session_events(
    mut events: broadcast::Receiver<SessionEvent>,
    cart: CartClient,
    orders: OrderClient,
) {
    info!("Session relay started");
    loop {
        match events.recv().await {
            Ok(SessionEvent::Authenticated { token }) => {
                debug!("Signed in, loading cart");
                if let Err(e) = cart.inner().send(CartAction::Fetch { token }).await {
                    warn!(error = %e, "Cart fetch not delivered");
                }
            }
            Ok(SessionEvent::LoggedOut) => {
                debug!("Signed out, discarding cart and orders");
                if let Err(e) = cart.inner().send(CartAction::Discard).await {
                    warn!(error = %e, "Cart discard not delivered");
                }
                if let Err(e) = orders.inner().send(OrderAction::Discard).await {
                    warn!(error = %e, "Order discard not delivered");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Session relay lagged behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
    info!("Session relay stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_store::CartState;
    use crate::model::AccessToken;
    use crate::order_store::OrderState;
    use store_framework::mock::MockStore;

    #[tokio::test]
    async fn test_events_become_store_actions() {
        let mut cart = MockStore::<CartState>::new();
        let mut orders = MockStore::<OrderState>::new();
        cart.expect_action().return_ok(None);
        cart.expect_action().return_ok(None);
        orders.expect_action().return_ok(Vec::new());

        let (tx, rx) = broadcast::channel(4);
        let relay = tokio::spawn(relay_session_events(
            rx,
            CartClient::new(cart.client()),
            OrderClient::new(orders.client()),
        ));
        tx.send(SessionEvent::Authenticated {
            token: AccessToken::new("t"),
        })
        .unwrap();
        tx.send(SessionEvent::LoggedOut).unwrap();
        drop(tx);
        relay.await.unwrap();

        // The relay only enqueues; wait until both mocks answered everything.
        cart.client().settled().await.unwrap();
        orders.client().settled().await.unwrap();

        let received = cart.received();
        assert!(matches!(
            received.as_slice(),
            [CartAction::Fetch { token }, CartAction::Discard] if token.expose() == "t"
        ));
        assert!(matches!(orders.received().as_slice(), [OrderAction::Discard]));
        cart.verify();
        orders.verify();
    }
}
