//! # Session Client
//!
//! High-level API for the session store.
use crate::model::{AccessToken, Credentials, Profile, ProfileUpdate, Registration};
use crate::session_store::{SessionAction, SessionError, SessionState};
use store_framework::{StoreClient, StoreHandle};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SessionClient {
    inner: StoreClient<SessionState>,
}

impl SessionClient {
    pub fn new(inner: StoreClient<SessionState>) -> Self {
        Self { inner }
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<AccessToken> {
        self.inner.snapshot().token
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.snapshot().is_logged_in
    }

    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<Profile, SessionError> {
        debug!("Sending request");
        self.inner
            .dispatch(SessionAction::Register(registration))
            .await
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: Credentials) -> Result<Profile, SessionError> {
        debug!("Sending request");
        self.inner.dispatch(SessionAction::Login(credentials)).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> Result<Profile, SessionError> {
        self.inner.dispatch(SessionAction::FetchProfile).await
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile, SessionError> {
        self.inner
            .dispatch(SessionAction::UpdateProfile(update))
            .await
    }

    #[instrument(skip(self))]
    pub async fn refresh_access(&self) -> Result<AccessToken, SessionError> {
        self.inner.dispatch(SessionAction::RefreshAccess).await?;
        self.token().ok_or(SessionError::NotAuthenticated)
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.inner.dispatch(SessionAction::Logout).await.map(|_| ())
    }
}

impl StoreHandle<SessionState> for SessionClient {
    fn inner(&self) -> &StoreClient<SessionState> {
        &self.inner
    }
}
