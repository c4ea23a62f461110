use super::events::relay_session_events;
use crate::api::{HttpApi, StorefrontApi};
use crate::cart_store::{self, CartContext};
use crate::catalog_store::{self, CatalogContext};
use crate::clients::{CartClient, CatalogClient, ModalClient, OrderClient, SessionClient};
use crate::config::{ConfigError, StorefrontConfig, DEFAULT_MAILBOX_CAPACITY};
use crate::modal_store;
use crate::notify::{Notifier, TracingNotifier};
use crate::order_store::{self, OrderContext};
use crate::session_store::{self, SessionContext, SessionError, SessionEvent};
use crate::token_store::{FileTokenStore, TokenStore, TokenStoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Capacity of the session event bus.
const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not read the stored session: {0}")]
    Storage(#[from] TokenStoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Store task failed: {0}")]
    TaskFailed(String),
}

/// Every store of the storefront, running and wired together.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use storefront::api::fake::FakeApi;
/// use storefront::lifecycle::Storefront;
/// use storefront::notify::TracingNotifier;
/// use storefront::token_store::MemoryTokenStore;
///
/// #[tokio::main]
/// async fn main() {
///     let shop = Storefront::new(
///         Arc::new(FakeApi::seeded()),
///         Arc::new(MemoryTokenStore::new()),
///         Arc::new(TracingNotifier),
///     )
///     .unwrap();
///
///     let products = shop.catalog.fetch_page(1).await.unwrap();
///     assert_eq!(products.len(), 3);
///
///     shop.shutdown().await.unwrap();
/// }
/// ```
pub struct Storefront {
    pub session: SessionClient,
    pub catalog: CatalogClient,
    pub cart: CartClient,
    pub orders: OrderClient,
    pub modal: ModalClient,

    /// Kept so new observers can subscribe to session events.
    events: broadcast::Sender<SessionEvent>,

    /// Task handles of every actor and of the relay.
    handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Starts every store with the default mailbox capacity.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorefrontError> {
        Self::with_capacity(DEFAULT_MAILBOX_CAPACITY, api, tokens, notifier)
    }

    /// Starts every store against the backend and storage named by `config`.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        info!(api = %config.api_url, storage = %config.storage_path.display(), "Starting storefront");
        Self::with_capacity(
            config.mailbox_capacity,
            Arc::new(HttpApi::new(config.api_url.clone())),
            Arc::new(FileTokenStore::new(config.storage_path.clone())),
            Arc::new(TracingNotifier),
        )
    }

    /// Starts every store with mailboxes of `capacity` requests.
    ///
    /// The persisted token is read once, here.
    pub fn with_capacity(
        capacity: usize,
        api: Arc<dyn StorefrontApi>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorefrontError> {
        let restored = tokens.load()?;
        let (events, relay_events) = broadcast::channel(EVENT_CAPACITY);

        // =====================================================================
        // 1. Session: the only store that touches durable storage
        // =====================================================================
        let (session_actor, session) = session_store::new(capacity, restored);
        let session_handle = tokio::spawn(session_actor.run(SessionContext {
            api: api.clone(),
            tokens,
            notifier: notifier.clone(),
            events: events.clone(),
        }));

        // =====================================================================
        // 2. Catalog, cart, orders, modal
        // =====================================================================
        let (catalog_actor, catalog) = catalog_store::new(capacity);
        let catalog_handle = tokio::spawn(catalog_actor.run(CatalogContext { api: api.clone() }));

        let (cart_actor, cart) = cart_store::new(capacity);
        let cart_handle = tokio::spawn(cart_actor.run(CartContext {
            api: api.clone(),
            notifier: notifier.clone(),
        }));

        let (order_actor, orders) = order_store::new(capacity);
        let order_handle = tokio::spawn(order_actor.run(OrderContext { api, notifier }));

        let (modal_actor, modal) = modal_store::new(capacity);
        let modal_handle = tokio::spawn(modal_actor.run(()));

        // =====================================================================
        // 3. Relay: session events drive the cart and order stores
        // =====================================================================
        let cart = CartClient::new(cart);
        let orders = OrderClient::new(orders);
        let relay_handle = tokio::spawn(relay_session_events(
            relay_events,
            cart.clone(),
            orders.clone(),
        ));

        Ok(Self {
            session: SessionClient::new(session),
            catalog: CatalogClient::new(catalog),
            cart,
            orders,
            modal: ModalClient::new(modal),
            events,
            handles: vec![
                session_handle,
                relay_handle,
                catalog_handle,
                cart_handle,
                order_handle,
                modal_handle,
            ],
        })
    }

    /// Observes sign-in and sign-out.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Confirms a persisted session and loads its cart.
    ///
    /// Without a stored token this does nothing. A rejected token stays stored and the user stays
    /// logged out.
    pub async fn bootstrap(&self) {
        let Some(token) = self.session.token() else {
            info!("No stored session");
            return;
        };
        if let Err(e) = self.session.fetch_profile().await {
            warn!(error = %e, "Stored session was not accepted");
            return;
        }
        if let Err(e) = self.cart.fetch(token).await {
            warn!(error = %e, "Cart of the stored session could not be loaded");
        }
    }

    /// Gracefully shuts down every store.
    ///
    /// Returns an error if any task panicked.
    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        info!("Shutting down storefront...");

        // Dropping the senders closes the mailboxes; the relay follows the session store.
        let Self {
            session,
            catalog,
            cart,
            orders,
            modal,
            events,
            handles,
        } = self;
        drop(session);
        drop(catalog);
        drop(cart);
        drop(orders);
        drop(modal);
        drop(events);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store task failed");
                return Err(StorefrontError::TaskFailed(e.to_string()));
            }
        }

        info!("Storefront shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{ApiCall, FakeApi};
    use crate::model::Credentials;
    use crate::token_store::MemoryTokenStore;
    use std::time::Duration;
    use store_framework::StoreHandle;

    fn start(api: Arc<FakeApi>, tokens: MemoryTokenStore) -> Storefront {
        Storefront::new(api, Arc::new(tokens), Arc::new(TracingNotifier)).unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_restores_session_and_cart() {
        let api = Arc::new(FakeApi::seeded());
        let user = api.add_account("ann@example.com", "password1", "Ann", "Lee");
        let token = api.issue_token(user.id);
        let shop = start(api.clone(), MemoryTokenStore::with_token(token.expose()));

        shop.bootstrap().await;

        assert!(shop.session.is_logged_in());
        assert!(shop.cart.snapshot().cart.is_some());
        assert_eq!(api.calls(), vec![ApiCall::Profile, ApiCall::Cart]);
        shop.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_sends_nothing() {
        let api = Arc::new(FakeApi::seeded());
        let shop = start(api.clone(), MemoryTokenStore::new());

        shop.bootstrap().await;

        assert!(api.calls().is_empty());
        shop.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_discards_cart() {
        let api = Arc::new(FakeApi::seeded());
        api.add_account("ann@example.com", "password1", "Ann", "Lee");
        let shop = start(api.clone(), MemoryTokenStore::new());
        let mut events = shop.subscribe_events();

        shop.session
            .login(Credentials::new("ann@example.com", "password1"))
            .await
            .unwrap();
        let mut cart = shop.cart.subscribe();
        tokio::time::timeout(Duration::from_secs(1), cart.wait_for(|s| s.cart.is_some()))
            .await
            .unwrap()
            .unwrap();

        shop.session.logout().await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), cart.wait_for(|s| s.cart.is_none()))
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(
            events.recv().await.unwrap(),
            SessionEvent::Authenticated { .. }
        ));
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
        shop.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_storage_file_starts_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "").unwrap();
        let api = Arc::new(FakeApi::seeded());

        let shop = Storefront::new(
            api.clone(),
            Arc::new(FileTokenStore::new(&path)),
            Arc::new(TracingNotifier),
        )
        .unwrap();
        shop.bootstrap().await;

        assert_eq!(shop.session.token(), None);
        assert!(!shop.session.is_logged_in());
        assert!(api.calls().is_empty());
        shop.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_completes_while_relay_is_idle() {
        let shop = start(Arc::new(FakeApi::seeded()), MemoryTokenStore::new());
        tokio::time::timeout(Duration::from_secs(1), shop.shutdown())
            .await
            .unwrap()
            .unwrap();
    }
}
