//! # Store Client
//!
//! This module defines the generic client for communicating with store actors.

use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::store::StoreState;
use tokio::sync::{mpsc, oneshot, watch};

/// ## StoreClient
///
/// The `StoreClient<S>` provides a type‑safe, async API for interacting with a `StoreActor<S>`.
/// Actions travel over a Tokio mpsc mailbox and results come back on oneshot channels. State is
/// observed through a `watch` receiver without touching the mailbox.
///
/// * **Cloneable** – holds a sender and a receiver, so cloning is inexpensive.
/// * **Two ways to act** – `dispatch` awaits the outcome, `send` only enqueues.
/// * **Two ways to read** – `snapshot` returns the latest published state, `settled` waits for
///   every earlier request first.
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
    state: watch::Receiver<S>,
}

impl<S: StoreState> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>, state: watch::Receiver<S>) -> Self {
        Self { sender, state }
    }

    /// Runs `action` on the store and waits for its result.
    pub async fn dispatch(&self, action: S::Action) -> Result<S::ActionResult, S::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)?
    }

    /// Enqueues `action` without waiting for it to run.
    ///
    /// The outcome is only visible in the logs and in the published state.
    pub async fn send(&self, action: S::Action) -> Result<(), FrameworkError> {
        let (respond_to, _response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::StoreClosed)
    }

    /// State after every request queued before this call has been handled.
    pub async fn settled(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    /// A fresh receiver for observing state changes.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.clone()
    }
}
