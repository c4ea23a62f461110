//! Error types for the Order store.

use crate::api::ApiError;
use store_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    /// Rejected locally, nothing was sent.
    #[error("Shipping address is required")]
    EmptyShippingAddress,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
