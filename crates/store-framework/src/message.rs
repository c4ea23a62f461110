//! # Store Messages
//!
//! This module defines the message types used for communication between
//! the `StoreClient` and `StoreActor`.

use crate::store::StoreState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<T>;

/// Internal message type sent to the actor.
///
/// - **Action**: run [`StoreState::handle_action`] and reply with its result.
/// - **Snapshot**: reply with the state as it stands once every earlier request has run.
///
/// A store has one state value, so unlike a resource registry there are no ids to route on.
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    Action {
        action: S::Action,
        respond_to: Response<Result<S::ActionResult, S::Error>>,
    },
    Snapshot {
        respond_to: Response<S>,
    },
}
