//! # Session Store
//!
//! Who is signed in: the profile, the bearer token and the login flag.
//!
//! ## Structure
//!
//! - [`state`] - [`SessionState`] and [`SessionContext`]
//! - [`actions`] - [`SessionAction`]
//! - [`store`] - [`StoreState`](store_framework::StoreState) implementation
//! - [`events`] - [`SessionEvent`] published after sign-in and sign-out
//! - [`error`] - [`SessionError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Start-up
//!
//! The token persisted by the last run is restored into the initial state, but `is_logged_in`
//! stays `false` until a profile fetch with that token succeeds:
//!
//! ```rust,ignore
//! let restored = tokens.load()?;
//! let (actor, client) = session_store::new(32, restored);
//! tokio::spawn(actor.run(context));
//! client.dispatch(SessionAction::FetchProfile).await?;   // now logged in
//! ```
//!
//! ## Cross-store effects
//!
//! The session store never talks to the cart. A successful register or login publishes
//! [`SessionEvent::Authenticated`]; the lifecycle relay turns it into exactly one cart fetch.

pub mod actions;
pub mod error;
pub mod events;
pub mod state;
pub mod store;

pub use actions::*;
pub use error::*;
pub use events::*;
pub use state::*;

use crate::model::AccessToken;
use store_framework::{StoreActor, StoreClient};

/// Creates a new Session actor and its client, seeded with a restored token.
pub fn new(
    capacity: usize,
    restored: Option<AccessToken>,
) -> (StoreActor<SessionState>, StoreClient<SessionState>) {
    StoreActor::with_state(capacity, SessionState::restored(restored))
}
