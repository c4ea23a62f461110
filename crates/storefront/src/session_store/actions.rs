//! Actions of the session store.
//!
//! Every action resolves to the [`Profile`](crate::model::Profile) held once it finished.

use crate::model::{Credentials, ProfileUpdate, Registration};

#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Creates an account and signs in with it.
    Register(Registration),
    Login(Credentials),
    /// Reloads the profile with the current token.
    ///
    /// # Errors
    /// Fails with `NotAuthenticated` without any request when no token is held.
    FetchProfile,
    UpdateProfile(ProfileUpdate),
    /// Trades the refresh token for a new access token.
    RefreshAccess,
    Logout,
}
