use crate::api::StorefrontApi;
use crate::model::Order;
use crate::notify::Notifier;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderState {
    pub orders: Vec<Order>,
    pub loading: bool,
}

#[derive(Clone)]
pub struct OrderContext {
    pub api: Arc<dyn StorefrontApi>,
    pub notifier: Arc<dyn Notifier>,
}
