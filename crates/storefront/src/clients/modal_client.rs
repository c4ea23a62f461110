//! # Modal Client
use crate::modal_store::{ModalAction, ModalError, ModalId, ModalState};
use store_framework::{StoreClient, StoreHandle};
use tracing::instrument;

#[derive(Clone)]
pub struct ModalClient {
    inner: StoreClient<ModalState>,
}

impl ModalClient {
    pub fn new(inner: StoreClient<ModalState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, id), fields(modal = %id))]
    pub async fn set_active(&self, id: ModalId) -> Result<(), ModalError> {
        self.inner
            .dispatch(ModalAction::SetActive(id))
            .await
            .map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn close(&self) -> Result<(), ModalError> {
        self.inner.dispatch(ModalAction::Close).await.map(|_| ())
    }

    /// The overlay currently open.
    pub fn active(&self) -> Option<ModalId> {
        self.inner.snapshot().active
    }
}

impl StoreHandle<ModalState> for ModalClient {
    fn inner(&self) -> &StoreClient<ModalState> {
        &self.inner
    }
}
