use async_trait::async_trait;
use serde::Serialize;
use std::fmt::{self, Display};
use store_framework::{FrameworkError, StateCell, StoreState};
use thiserror::Error;

/// Name of an overlay, e.g. `"login"` or `"cart"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModalId(pub String);

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModalState {
    pub active: Option<ModalId>,
}

#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Opens `id`, closing whatever was open.
    SetActive(ModalId),
    Close,
}

#[derive(Debug, Error)]
pub enum ModalError {
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

#[async_trait]
impl StoreState for ModalState {
    type Action = ModalAction;
    /// The overlay open afterwards.
    type ActionResult = Option<ModalId>;
    type Context = ();
    type Error = ModalError;

    async fn handle_action(
        cell: &StateCell<Self>,
        action: ModalAction,
        _ctx: &(),
    ) -> Result<Option<ModalId>, ModalError> {
        let active = match action {
            ModalAction::SetActive(id) => Some(id),
            ModalAction::Close => None,
        };
        cell.update(|s| s.active.clone_from(&active));
        Ok(active)
    }
}
