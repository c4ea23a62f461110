//! # Storefront
//!
//! Client-side state of an online shop, built from observable stores that talk to a REST
//! backend.
//!
//! ## Core Components
//!
//! - **[session_store]**, **[catalog_store]**, **[cart_store]**, **[order_store]**,
//!   **[modal_store]**: one [`StoreState`](store_framework::StoreState) each, run by a
//!   `StoreActor`.
//! - **[clients]**: typed wrappers (e.g. [`CartClient`](clients::CartClient)) that hide the
//!   action enums.
//! - **[api]**: the [`StorefrontApi`](api::StorefrontApi) gateway, its `reqwest` implementation
//!   and an in-memory fake.
//! - **[lifecycle]**: [`Storefront`](lifecycle::Storefront) starts and wires every store.
//! - **[model]**: wire types shared by the API and the stores.
//! - **[config]**, **[token_store]**, **[notify]**: environment configuration, the persisted
//!   access token and user-facing notifications.
//!
//! ## Testing
//!
//! [`api::fake::FakeApi`] records every call; see [`store_framework::mock`] for testing clients
//! without running stores.

pub mod api;
pub mod cart_store;
pub mod catalog_store;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod modal_store;
pub mod model;
pub mod notify;
pub mod order_store;
pub mod session_store;
pub mod token_store;
