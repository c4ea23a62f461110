//! # Store Actor
//!
//! This module defines the `StoreActor`, the component that owns a store's state and runs its
//! actions. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive write access to the state.

use crate::cell::StateCell;
use crate::client::StoreClient;
use crate::message::StoreRequest;
use crate::store::StoreState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns one store's state.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the [`StateCell`] and the receiver end
/// of the mailbox. Readers never go through the mailbox for plain observation: they hold a
/// `watch::Receiver` and see every published change, including the loading flag flipping while an
/// action awaits the network.
///
/// **Concurrency Model**:
/// Each actor processes its requests *sequentially*. Two overlapping `add` calls on the cart
/// store therefore run one after the other, and the later arrival is the one whose result ends
/// up in the state. Different stores run in parallel.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use store_framework::{FrameworkError, StateCell, StoreActor, StoreState};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)]
/// struct Counter { value: u32 }
///
/// #[derive(Debug)]
/// enum CounterAction { Add(u32) }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error(transparent)]
/// struct CounterError(#[from] FrameworkError);
///
/// #[async_trait]
/// impl StoreState for Counter {
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     async fn handle_action(cell: &StateCell<Self>, action: CounterAction, _: &()) -> Result<u32, CounterError> {
///         let CounterAction::Add(n) = action;
///         cell.update(|s| s.value += n);
///         Ok(cell.read(|s| s.value))
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///     assert_eq!(client.dispatch(CounterAction::Add(2)).await.unwrap(), 2);
///     assert_eq!(client.snapshot().value, 2);
/// }
/// ```
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    cell: StateCell<S>,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates a store starting from `S::default()`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the mailbox. If it is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<S>) {
        Self::with_state(buffer_size, S::default())
    }

    /// Creates a store starting from `initial` (e.g. a token restored from disk).
    pub fn with_state(buffer_size: usize, initial: S) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (cell, state) = StateCell::new(initial);
        let actor = Self { receiver, cell };
        let client = StoreClient::new(sender, state);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every `handle_action` call. This allows stores
    /// to reach dependencies (API gateway, notifier, event bus) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: S::Context) {
        // Extract just the type name (e.g., "CartState" instead of "storefront::cart_store::state::CartState")
        let store = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(store, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Action { action, respond_to } => {
                    debug!(store, ?action, "Action");
                    let result = S::handle_action(&self.cell, action, &context).await;
                    match &result {
                        Ok(_) => info!(store, "Action ok"),
                        Err(e) => warn!(store, error = %e, "Action failed"),
                    }
                    // Fire-and-forget senders dropped their receiver already.
                    let _ = respond_to.send(result);
                }
                StoreRequest::Snapshot { respond_to } => {
                    debug!(store, "Snapshot");
                    let _ = respond_to.send(self.cell.snapshot());
                }
            }
        }

        info!(store, "Shutdown");
    }
}
