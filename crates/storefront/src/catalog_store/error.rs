//! Error types for the Catalog store.

use crate::api::ApiError;
use store_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
