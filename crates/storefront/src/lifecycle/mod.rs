//! # Storefront Lifecycle & Wiring
//!
//! Stores are simple on their own; wiring them together is where the complexity lives. This
//! module starts every store actor, injects its dependencies, relays session events to the cart
//! and order stores, and shuts everything down again.
//!
//! ## The Storefront
//!
//! [`Storefront`] owns one client per store:
//!
//! ```rust,ignore
//! let config = StorefrontConfig::from_env()?;
//! let shop = Storefront::from_config(&config)?;
//!
//! shop.bootstrap().await;                              // restores a persisted session
//! shop.catalog.fetch_page(1).await?;
//! shop.session.login(Credentials::new(email, password)).await?;
//!
//! shop.shutdown().await?;
//! ```
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them through `run(context)`:
//!
//! | Store | Context |
//! |-------|---------|
//! | session | API, token store, notifier, session event sender |
//! | catalog | API |
//! | cart | API, notifier |
//! | order | API, notifier |
//! | modal | `()` |
//!
//! ## Cross-store effects
//!
//! No store holds another store's client. The session store publishes [`SessionEvent`]s on a
//! broadcast channel and [`relay_session_events`] turns them into cart and order actions:
//!
//! - `Authenticated { token }` becomes one cart `Fetch`
//! - `LoggedOut` becomes a `Discard` for cart and orders
//!
//! The relay enqueues with `send`, so a slow cart never holds up the session store.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** and the storefront's event sender
//! 2. **The session actor stops** and drops its event sender with its context
//! 3. **The relay sees the bus close** and drops its cart and order clients
//! 4. **Every actor drains its mailbox** and the storefront awaits all tasks
//!
//! [`SessionEvent`]: crate::session_store::SessionEvent

pub mod events;
pub mod storefront;

pub use events::*;
pub use storefront::*;
