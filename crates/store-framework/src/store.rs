//! # StoreState Trait
//!
//! The `StoreState` trait defines the contract every store (session, catalog, cart, …) must
//! implement to be driven by the generic `StoreActor`. It names the action enum, the action
//! result, the injected context and the error type, and provides a single async hook
//! (`handle_action`) that performs the store's work against a [`StateCell`].
//!
//! # Architecture Note
//! A store holds exactly one state value, not a collection. The state is published through a
//! `watch` channel so observers always see the latest value, including transient flags such as
//! `loading` that change *during* an action.
//!
//! We use associated types to enforce type safety: a `CartState` store only accepts
//! `CartAction`s, and the compiler rejects a `CatalogAction` sent to it.

use crate::cell::StateCell;
use crate::error::FrameworkError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any state container must implement to be managed by [`StoreActor`](crate::StoreActor).
///
/// # Async & Context
/// `handle_action` is async so stores can perform network calls. The `Context` type is injected
/// into every call, which allows "late binding" of dependencies (API gateway, notifier, event
/// bus) when the actor is started rather than when it is constructed.
///
/// # Errors
/// Each store defines a single error enum for all of its actions. It must convert from
/// [`FrameworkError`] so that mailbox failures surface through the same type.
#[async_trait]
pub trait StoreState: Clone + Default + Send + Sync + 'static {
    /// Enum of the operations the store supports.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this store.
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Handle one action.
    ///
    /// The hook reads and mutates state exclusively through `cell`. Every mutation made with
    /// [`StateCell::update`] is published to subscribers immediately. Actions of one store never
    /// overlap: the actor awaits this future before taking the next request.
    async fn handle_action(
        cell: &StateCell<Self>,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
