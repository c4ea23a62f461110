//! # Store Clients
//!
//! Domain wrappers around the generic [`StoreClient`](store_framework::StoreClient). Each one
//! turns an action enum into plain async methods and inherits `snapshot`, `settled` and
//! `subscribe` from [`StoreHandle`](store_framework::StoreHandle).

pub mod cart_client;
pub mod catalog_client;
pub mod modal_client;
pub mod order_client;
pub mod session_client;

pub use cart_client::CartClient;
pub use catalog_client::CatalogClient;
pub use modal_client::ModalClient;
pub use order_client::OrderClient;
pub use session_client::SessionClient;
