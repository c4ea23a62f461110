//! # Mock Stores & Testing Guide
//!
//! [`MockStore<S>`] hands out a real [`StoreClient<S>`] whose mailbox is served by an in-memory
//! expectation queue instead of a `StoreActor`. It lets you test code that *drives* stores (event
//! relays, orchestration, domain client wrappers) without any network or store logic.
//!
//! ## When to use Mocks vs Real Stores
//!
//! | Feature | MockStore | Real Store |
//! |---------|-----------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Logic** | None, canned results | The store's `handle_action` |
//! | **Use Case** | Testing code *around* the client | Testing the store itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Requires a failing dependency |
//!
//! ```rust
//! use store_framework::mock::MockStore;
//! use store_framework::{FrameworkError, StateCell, StoreState};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Basket { items: u32 }
//! #[derive(Debug)] enum BasketAction { Add }
//! #[derive(Debug, thiserror::Error)] #[error(transparent)] struct BasketError(#[from] FrameworkError);
//!
//! #[async_trait]
//! impl StoreState for Basket {
//!     type Action = BasketAction; type ActionResult = u32; type Context = (); type Error = BasketError;
//!     async fn handle_action(_: &StateCell<Self>, _: BasketAction, _: &()) -> Result<u32, BasketError> {
//!         unreachable!("the mock never runs store logic")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Basket>::new();
//!     mock.expect_action().return_ok(3);
//!
//!     let client = mock.client();
//!     assert_eq!(client.dispatch(BasketAction::Add).await.unwrap(), 3);
//!
//!     mock.verify();
//!     assert!(matches!(mock.received().as_slice(), [BasketAction::Add]));
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw mailbox, or the fluent [`MockStore`] API.

use crate::cell::StateCell;
use crate::client::StoreClient;
use crate::message::StoreRequest;
use crate::store::StoreState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<S: StoreState> {
    Action {
        response: Result<S::ActionResult, S::Error>,
    },
}

/// A mock store with expectation tracking for fluent testing.
///
/// Every received action is recorded (see [`MockStore::received`]). Snapshot requests are
/// answered from the mock's own state, which tests can set with [`MockStore::set_state`].
pub struct MockStore<S: StoreState> {
    client: StoreClient<S>,
    cell: Arc<StateCell<S>>,
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
    received: Arc<Mutex<Vec<S::Action>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> Default for MockStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StoreState> MockStore<S> {
    /// Creates a new mock store with default state and no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let (cell, state) = StateCell::new(S::default());
        let cell = Arc::new(cell);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));

        let task_cell = cell.clone();
        let task_expectations = expectations.clone();
        let task_received = received.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    StoreRequest::Action { action, respond_to } => {
                        task_received.lock().unwrap().push(action);
                        let expectation = task_expectations.lock().unwrap().pop_front();
                        match expectation {
                            Some(Expectation::Action { response }) => {
                                let _ = respond_to.send(response);
                            }
                            None => panic!("Unexpected action: no expectation left"),
                        }
                    }
                    StoreRequest::Snapshot { respond_to } => {
                        let _ = respond_to.send(task_cell.snapshot());
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender, state),
            cell,
            expectations,
            received,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Publishes `state` to every subscriber of the mock's clients.
    pub fn set_state(&self, state: S) {
        self.cell.replace(state);
    }

    /// Expects one more action.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<S> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Drains the actions received so far, in arrival order.
    pub fn received(&self) -> Vec<S::Action> {
        std::mem::take(&mut *self.received.lock().unwrap())
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for action expectations.
pub struct ActionExpectationBuilder<S: StoreState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: StoreState> ActionExpectationBuilder<S> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: S::ActionResult) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Action {
            response: Ok(result),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: S::Error) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Action {
            response: Err(error),
        });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the raw mailbox behind it.
///
/// # Testing Strategy
/// Instead of spinning up a `StoreActor`, the test owns the receiving end of the mailbox. It can
/// inspect each request as it arrives and answer it (or drop it) to simulate success, failure or
/// delays deterministically.
///
/// **Note**: Consider using [`MockStore`] for a more fluent API.
pub fn create_mock_client<S: StoreState>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>, watch::Sender<S>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (state_tx, state_rx) = watch::channel(S::default());
    (StoreClient::new(sender, state_rx), receiver, state_tx)
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(
    S::Action,
    oneshot::Sender<Result<S::ActionResult, S::Error>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameworkError;
    use async_trait::async_trait;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Wishlist {
        items: Vec<u32>,
    }

    #[derive(Debug, PartialEq)]
    enum WishlistAction {
        Add(u32),
    }

    #[derive(Debug, thiserror::Error)]
    enum WishlistError {
        #[error("full")]
        Full,
        #[error(transparent)]
        Framework(#[from] FrameworkError),
    }

    #[async_trait]
    impl StoreState for Wishlist {
        type Action = WishlistAction;
        type ActionResult = usize;
        type Context = ();
        type Error = WishlistError;

        async fn handle_action(
            cell: &StateCell<Self>,
            action: WishlistAction,
            _ctx: &(),
        ) -> Result<usize, WishlistError> {
            let WishlistAction::Add(id) = action;
            cell.update(|s| s.items.push(id));
            Ok(cell.read(|s| s.items.len()))
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver, _state) = create_mock_client::<Wishlist>(10);

        let task = tokio::spawn(async move { client.dispatch(WishlistAction::Add(9)).await });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, WishlistAction::Add(9));
        responder.send(Ok(1)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::<Wishlist>::new();
        mock.expect_action().return_ok(1);
        mock.expect_action().return_err(WishlistError::Full);

        let client = mock.client();
        assert_eq!(client.dispatch(WishlistAction::Add(1)).await.unwrap(), 1);
        assert!(matches!(
            client.dispatch(WishlistAction::Add(2)).await,
            Err(WishlistError::Full)
        ));

        mock.verify();
        assert_eq!(
            mock.received(),
            vec![WishlistAction::Add(1), WishlistAction::Add(2)]
        );
    }

    #[tokio::test]
    async fn test_mock_store_state_is_observable() {
        let mock = MockStore::<Wishlist>::new();
        let client = mock.client();

        mock.set_state(Wishlist { items: vec![4, 5] });

        assert_eq!(client.snapshot().items, vec![4, 5]);
        assert_eq!(client.settled().await.unwrap().items, vec![4, 5]);
    }
}
