//! # Catalog Store
//!
//! The browsable product list: one page of products, the categories, the active category, the
//! search query, the active filters and the selected product detail.
//!
//! ## Structure
//!
//! - [`state`] - [`CatalogState`], [`CatalogContext`] and the page arithmetic
//! - [`actions`] - [`CatalogAction`] and [`CatalogActionResult`]
//! - [`store`] - [`StoreState`](store_framework::StoreState) implementation
//! - [`error`] - [`CatalogError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Pagination
//!
//! The backend serves [`PAGE_SIZE`] products per page. After every successful page fetch
//! `page_count == ceil(products_count / PAGE_SIZE)`. A text search replaces the products but
//! leaves the pagination cursor where it was.
//!
//! Catalog failures are only logged; the previous page stays on screen.

pub mod actions;
pub mod error;
pub mod state;
pub mod store;

pub use actions::*;
pub use error::*;
pub use state::*;

use store_framework::{StoreActor, StoreClient};

/// Creates a new Catalog actor and its client.
pub fn new(capacity: usize) -> (StoreActor<CatalogState>, StoreClient<CatalogState>) {
    StoreActor::new(capacity)
}
