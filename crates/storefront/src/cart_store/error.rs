//! Error types for the Cart store.

use crate::api::ApiError;
use store_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
