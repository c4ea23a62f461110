use super::events::SessionEvent;
use crate::api::StorefrontApi;
use crate::model::{AccessToken, Profile};
use crate::notify::Notifier;
use crate::token_store::TokenStore;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Observable session state. Passwords are never kept here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub profile: Profile,
    pub is_logged_in: bool,
    pub token: Option<AccessToken>,
    pub refresh: Option<AccessToken>,
    pub loading: bool,
}

impl SessionState {
    /// State after a restart: the persisted token, nobody confirmed as logged in yet.
    pub fn restored(token: Option<AccessToken>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }
}

/// Dependencies of the session store.
#[derive(Clone)]
pub struct SessionContext {
    pub api: Arc<dyn StorefrontApi>,
    pub tokens: Arc<dyn TokenStore>,
    pub notifier: Arc<dyn Notifier>,
    pub events: broadcast::Sender<SessionEvent>,
}
