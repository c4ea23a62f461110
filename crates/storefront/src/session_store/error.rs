//! Error types for the Session store.

use crate::api::ApiError;
use crate::token_store::TokenStoreError;
use store_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The action needs a token and none is held.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("No refresh token")]
    MissingRefreshToken,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not persist the session: {0}")]
    Storage(#[from] TokenStoreError),

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
