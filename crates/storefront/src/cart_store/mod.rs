//! # Cart Store
//!
//! The signed-in user's cart. Every networked action carries the bearer token explicitly; the
//! store holds no credentials of its own.
//!
//! `Add` and `Clear` ignore the mutation response and issue exactly one reconciliation fetch of
//! the whole cart. `UpdateQuantity` and `RemoveItem` take the returned cart as the new state.

pub mod actions;
pub mod error;
pub mod state;
pub mod store;

pub use actions::*;
pub use error::*;
pub use state::*;

use store_framework::{StoreActor, StoreClient};

/// Creates a new Cart actor and its client.
pub fn new(capacity: usize) -> (StoreActor<CartState>, StoreClient<CartState>) {
    StoreActor::new(capacity)
}
