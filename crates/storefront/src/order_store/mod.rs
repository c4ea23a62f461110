//! # Order Store
//!
//! Order history and order creation for the signed-in user. Like the cart, every networked action
//! carries the bearer token.
//!
//! A created order *replaces* the local list: right after `Create` succeeds the store holds
//! exactly that one order, whatever the history was. `Fetch` brings the history back.

pub mod actions;
pub mod error;
pub mod state;
pub mod store;

pub use actions::*;
pub use error::*;
pub use state::*;

use store_framework::{StoreActor, StoreClient};

/// Creates a new Order actor and its client.
pub fn new(capacity: usize) -> (StoreActor<OrderState>, StoreClient<OrderState>) {
    StoreActor::new(capacity)
}
