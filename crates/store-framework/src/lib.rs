//! # Store Framework
//!
//! This crate provides the building blocks for observable, single-writer state containers
//! ("stores") driven by the **Actor Model**. Each store owns one state value, runs its actions
//! one at a time in its own Tokio task, and publishes every change through a `watch` channel.
//!
//! ## Why Stores + Actor Model?
//!
//! ### Stores
//!
//! - One state value per concern (session, catalog, cart, …)
//! - State is read by anyone, written only by the store's own actions
//! - Transient flags such as `loading` are part of the state and therefore observable
//!
//! ### Actor Model
//!
//! - Isolated state (no shared locks in store code)
//! - Message-passing concurrency
//! - Sequential processing within each store eliminates interleaved writes
//!
//! ### The Synergy
//!
//! - **Separation**: each store has its own actor, mailbox and error type
//! - **Coordination**: stores never call each other; an application-level relay turns events of
//!   one store into actions of another
//! - **Predictability**: two overlapping requests on one store resolve in mailbox arrival order
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`StoreState`]) - Your state type and its async action handler
//! 2. **Runtime Layer** ([`StoreActor`], [`StateCell`]) - Message processing and publication
//! 3. **Interface Layer** ([`StoreClient`], [`StoreHandle`]) - Type-safe communication
//!
//! ```rust
//! use store_framework::{FrameworkError, StateCell, StoreActor, StoreState};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Notes { items: Vec<String>, loading: bool }
//!
//! #[derive(Debug)]
//! enum NotesAction { Add(String), Clear }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum NotesError {
//!     #[error("note is empty")]
//!     Empty,
//!     #[error(transparent)]
//!     Framework(#[from] FrameworkError),
//! }
//!
//! #[async_trait]
//! impl StoreState for Notes {
//!     type Action = NotesAction;
//!     type ActionResult = usize;
//!     type Context = ();
//!     type Error = NotesError;
//!
//!     async fn handle_action(cell: &StateCell<Self>, action: NotesAction, _: &()) -> Result<usize, NotesError> {
//!         let _loading = cell.begin_loading(|s| &mut s.loading);
//!         match action {
//!             NotesAction::Add(text) if text.is_empty() => return Err(NotesError::Empty),
//!             NotesAction::Add(text) => cell.update(|s| s.items.push(text)),
//!             NotesAction::Clear => cell.update(|s| s.items.clear()),
//!         }
//!         Ok(cell.read(|s| s.items.len()))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Notes>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     assert_eq!(client.dispatch(NotesAction::Add("milk".into())).await.unwrap(), 1);
//!     assert!(matches!(client.dispatch(NotesAction::Add(String::new())).await, Err(NotesError::Empty)));
//!
//!     let state = client.snapshot();
//!     assert_eq!(state.items, vec!["milk"]);
//!     assert!(!state.loading);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the loop starts (`actor.run(context)`), not at construction.
//! A store can therefore be created first and wired to an API gateway, a notifier or an event
//! bus afterwards.
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`mock::MockStore`] whose client speaks the real
//! `StoreClient<S>` API while answering from an expectation queue.

pub mod actor;
pub mod cell;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use cell::{LoadingGuard, StateCell};
pub use client::StoreClient;
pub use client_trait::StoreHandle;
pub use error::FrameworkError;
pub use message::{Response, StoreRequest};
pub use store::StoreState;
