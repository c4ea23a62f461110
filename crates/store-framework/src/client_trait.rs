//! # StoreHandle Trait
//!
//! Provides a common interface for store‑specific clients, adding default read methods built on
//! top of a generic `StoreClient`.
use crate::{FrameworkError, StoreClient, StoreState};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for store-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use store_framework::{FrameworkError, StateCell, StoreClient, StoreHandle, StoreState};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)]
/// struct Theme { dark: bool }
///
/// #[derive(Debug)]
/// enum ThemeAction { Toggle }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error(transparent)]
/// struct ThemeError(#[from] FrameworkError);
///
/// #[async_trait]
/// impl StoreState for Theme {
///     type Action = ThemeAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = ThemeError;
///
///     async fn handle_action(cell: &StateCell<Self>, _: ThemeAction, _: &()) -> Result<(), ThemeError> {
///         cell.update(|s| s.dark = !s.dark);
///         Ok(())
///     }
/// }
///
/// struct ThemeClient {
///     inner: StoreClient<Theme>,
/// }
///
/// impl StoreHandle<Theme> for ThemeClient {
///     fn inner(&self) -> &StoreClient<Theme> {
///         &self.inner
///     }
/// }
///
/// async fn usage(client: ThemeClient) {
///     // snapshot(), settled() and subscribe() are provided automatically!
///     let _dark = client.snapshot().dark;
///     let _ = client.settled().await;
/// }
/// ```
#[async_trait]
pub trait StoreHandle<S: StoreState>: Send + Sync {
    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Latest published state.
    fn snapshot(&self) -> S {
        self.inner().snapshot()
    }

    /// Observe state changes.
    fn subscribe(&self) -> watch::Receiver<S> {
        self.inner().subscribe()
    }

    /// State after every earlier request has been handled.
    #[tracing::instrument(skip(self))]
    async fn settled(&self) -> Result<S, FrameworkError> {
        tracing::debug!("Waiting for queued requests");
        self.inner().settled().await
    }
}
