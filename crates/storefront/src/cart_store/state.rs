use crate::api::StorefrontApi;
use crate::model::Cart;
use crate::notify::Notifier;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartState {
    /// `None` until the first successful fetch.
    pub cart: Option<Cart>,
    pub loading: bool,
}

#[derive(Clone)]
pub struct CartContext {
    pub api: Arc<dyn StorefrontApi>,
    pub notifier: Arc<dyn Notifier>,
}
