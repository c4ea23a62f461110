//! # Framework Errors
//!
//! This module defines the error types raised by the store runtime itself, independent of any
//! store's domain. Every store error type converts from [`FrameworkError`].

/// Errors that can occur within the store framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
}
