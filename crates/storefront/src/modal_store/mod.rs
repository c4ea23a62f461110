//! # Modal Store
//!
//! Which overlay, if any, is open. Purely local: no context, no requests.

pub mod store;

pub use store::*;

use store_framework::{StoreActor, StoreClient};

/// Creates a new Modal actor and its client.
pub fn new(capacity: usize) -> (StoreActor<ModalState>, StoreClient<ModalState>) {
    StoreActor::new(capacity)
}
