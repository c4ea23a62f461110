//! [`StoreState`] implementation for [`SessionState`].
//!
//! Failures are logged and announced through the notifier; the state keeps whatever it held
//! before the failing action.

use super::{SessionAction, SessionContext, SessionError, SessionEvent, SessionState};
use crate::api::ApiError;
use crate::model::{AccessToken, AuthResponse, Profile};
use async_trait::async_trait;
use store_framework::{StateCell, StoreState};
use tracing::{debug, info, warn};

pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const PROFILE_UNAVAILABLE: &str = "Could not load your profile";
pub const PROFILE_NOT_SAVED: &str = "Could not update your profile";

#[async_trait]
impl StoreState for SessionState {
    type Action = SessionAction;
    type ActionResult = Profile;
    type Context = SessionContext;
    type Error = SessionError;

    async fn handle_action(
        cell: &StateCell<Self>,
        action: SessionAction,
        ctx: &SessionContext,
    ) -> Result<Profile, SessionError> {
        match action {
            SessionAction::Register(registration) => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let auth = ctx.api.register(&registration).await.map_err(|e| {
                    let message = e
                        .first_validation_message()
                        .unwrap_or_else(|| REGISTRATION_FAILED.to_string());
                    warn!(error = %e, %message, "Registration rejected");
                    ctx.notifier.error(&message);
                    e
                })?;
                let token = establish(cell, ctx, auth)?;

                // The register payload carries a reduced user; reload the full profile.
                if let Err(e) = load_profile(cell, ctx, &token).await {
                    warn!(error = %e, "Profile refresh after registration failed");
                }

                ctx.notifier.success("Registration successful");
                announce(ctx, SessionEvent::Authenticated { token });
                Ok(cell.read(|s| s.profile.clone()))
            }

            SessionAction::Login(credentials) => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let auth = ctx.api.login(&credentials).await.map_err(|e| {
                    let message = e
                        .error_message()
                        .unwrap_or_else(|| INVALID_CREDENTIALS.to_string());
                    warn!(error = %e, %message, "Login rejected");
                    ctx.notifier.error(&message);
                    e
                })?;
                let token = establish(cell, ctx, auth)?;

                ctx.notifier.success("Logged in");
                announce(ctx, SessionEvent::Authenticated { token });
                Ok(cell.read(|s| s.profile.clone()))
            }

            SessionAction::FetchProfile => {
                let token = current_token(cell)?;
                let _loading = cell.begin_loading(|s| &mut s.loading);
                // The token is kept on failure; an expired one stays until logout.
                load_profile(cell, ctx, &token).await.map_err(|e| {
                    warn!(error = %e, "Profile fetch failed");
                    ctx.notifier
                        .error(&e.error_message().unwrap_or_else(|| PROFILE_UNAVAILABLE.into()));
                    e
                })?;
                Ok(cell.read(|s| s.profile.clone()))
            }

            SessionAction::UpdateProfile(update) => {
                let token = current_token(cell)?;
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let stored = ctx.api.update_profile(&token, &update).await.map_err(|e| {
                    warn!(error = %e, "Profile update failed");
                    ctx.notifier.error(
                        &e.first_validation_message()
                            .unwrap_or_else(|| PROFILE_NOT_SAVED.into()),
                    );
                    e
                })?;
                cell.update(|s| s.profile.apply(&stored));
                ctx.notifier.success("Profile updated");
                Ok(cell.read(|s| s.profile.clone()))
            }

            SessionAction::RefreshAccess => {
                let refresh = cell
                    .read(|s| s.refresh.clone())
                    .ok_or(SessionError::MissingRefreshToken)?;
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let access = ctx.api.refresh(&refresh).await?;
                ctx.tokens.save(&access)?;
                cell.update(|s| s.token = Some(access));
                info!("Access token refreshed");
                Ok(cell.read(|s| s.profile.clone()))
            }

            SessionAction::Logout => {
                ctx.tokens.clear()?;
                cell.replace(SessionState::default());
                announce(ctx, SessionEvent::LoggedOut);
                Ok(Profile::default())
            }
        }
    }
}

fn current_token(cell: &StateCell<SessionState>) -> Result<AccessToken, SessionError> {
    cell.read(|s| s.token.clone())
        .ok_or(SessionError::NotAuthenticated)
}

/// Persists the new token, then publishes the signed-in state.
fn establish(
    cell: &StateCell<SessionState>,
    ctx: &SessionContext,
    auth: AuthResponse,
) -> Result<AccessToken, SessionError> {
    ctx.tokens.save(&auth.access).map_err(|e| {
        warn!(error = %e, "Token could not be persisted");
        ctx.notifier.error("Could not save your session");
        e
    })?;
    let token = auth.access;
    cell.update(|s| {
        s.token = Some(token.clone());
        s.refresh = auth.refresh;
        s.profile = auth.user;
        s.is_logged_in = true;
    });
    Ok(token)
}

async fn load_profile(
    cell: &StateCell<SessionState>,
    ctx: &SessionContext,
    token: &AccessToken,
) -> Result<(), ApiError> {
    let profile = ctx.api.profile(token).await?;
    debug!(user = %profile.id, "Profile loaded");
    cell.update(|s| {
        s.profile = profile;
        s.is_logged_in = true;
    });
    Ok(())
}

fn announce(ctx: &SessionContext, event: SessionEvent) {
    if ctx.events.send(event).is_err() {
        debug!("No session event subscribers");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{ApiCall, FakeApi};
    use crate::model::{Credentials, ProfileUpdate, Registration};
    use crate::notify::{ChannelNotifier, Notification, NotificationKind};
    use crate::token_store::{MemoryTokenStore, TokenStore};
    use secrecy::SecretString;
    use std::sync::Arc;
    use store_framework::{StoreActor, StoreClient};
    use tokio::sync::{broadcast, mpsc};

    struct Harness {
        api: Arc<FakeApi>,
        tokens: Arc<MemoryTokenStore>,
        client: StoreClient<SessionState>,
        notes: mpsc::UnboundedReceiver<Notification>,
        events: broadcast::Receiver<SessionEvent>,
    }

    fn start(api: FakeApi, tokens: MemoryTokenStore) -> Harness {
        let api = Arc::new(api);
        let tokens = Arc::new(tokens);
        let (notifier, notes) = ChannelNotifier::new();
        let (events_tx, events) = broadcast::channel(8);
        let restored = tokens.load().unwrap();
        let (actor, client) = StoreActor::with_state(8, SessionState::restored(restored));
        tokio::spawn(actor.run(SessionContext {
            api: api.clone(),
            tokens: tokens.clone(),
            notifier: Arc::new(notifier),
            events: events_tx,
        }));
        Harness {
            api,
            tokens,
            client,
            notes,
            events,
        }
    }

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            email: email.into(),
            first_name: "Dana".into(),
            last_name: "Ray".into(),
            phone: None,
            date_of_birth: None,
            password: SecretString::from(password.to_string()),
            password_confirm: SecretString::from(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_persists_token_and_announces_it() {
        let api = FakeApi::seeded();
        api.add_account("ann@example.com", "password1", "Ann", "Lee");
        let mut h = start(api, MemoryTokenStore::new());

        let profile = h
            .client
            .dispatch(SessionAction::Login(Credentials::new(
                "ann@example.com",
                "password1",
            )))
            .await
            .unwrap();

        let state = h.client.snapshot();
        assert_eq!(profile.first_name, "Ann");
        assert!(state.is_logged_in);
        assert!(!state.loading);
        assert_eq!(h.tokens.load().unwrap(), state.token);
        assert_eq!(
            h.events.recv().await.unwrap(),
            SessionEvent::Authenticated {
                token: state.token.clone().unwrap()
            }
        );
        assert_eq!(h.notes.recv().await.unwrap().kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_error() {
        let api = FakeApi::seeded();
        api.add_account("ann@example.com", "password1", "Ann", "Lee");
        let mut h = start(api, MemoryTokenStore::new());

        let result = h
            .client
            .dispatch(SessionAction::Login(Credentials::new(
                "ann@example.com",
                "wrong-password",
            )))
            .await;

        assert!(matches!(result, Err(SessionError::Api(_))));
        assert_eq!(h.client.snapshot(), SessionState::default());
        assert_eq!(
            h.notes.recv().await.unwrap(),
            Notification {
                kind: NotificationKind::Error,
                message: "Invalid credentials".into()
            }
        );
        assert!(h.events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_login_failure_without_message_uses_generic_text() {
        let api = FakeApi::seeded();
        api.fail_next(ApiError::Request("connection reset".into()));
        let mut h = start(api, MemoryTokenStore::new());

        let _ = h
            .client
            .dispatch(SessionAction::Login(Credentials::new("a@b.c", "x")))
            .await;

        assert_eq!(h.notes.recv().await.unwrap().message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_register_refetches_profile_then_announces() {
        let mut h = start(FakeApi::seeded(), MemoryTokenStore::new());

        let profile = h
            .client
            .dispatch(SessionAction::Register(registration(
                "new@example.com",
                "long-enough",
            )))
            .await
            .unwrap();

        assert_eq!(profile.email, "new@example.com");
        assert!(h.client.snapshot().is_logged_in);
        assert_eq!(
            h.api.calls(),
            vec![
                ApiCall::Register {
                    email: "new@example.com".into()
                },
                ApiCall::Profile,
            ]
        );
        assert!(matches!(
            h.events.recv().await.unwrap(),
            SessionEvent::Authenticated { .. }
        ));
    }

    #[tokio::test]
    async fn test_register_failure_surfaces_first_validation_message() {
        let api = FakeApi::seeded();
        api.add_account("taken@example.com", "password1", "T", "K");
        let mut h = start(api, MemoryTokenStore::new());

        let result = h
            .client
            .dispatch(SessionAction::Register(registration(
                "taken@example.com",
                "long-enough",
            )))
            .await;

        assert!(result.is_err());
        assert_eq!(
            h.notes.recv().await.unwrap().message,
            "user with this email already exists."
        );
        assert!(h.tokens.load().unwrap().is_none());
        assert!(!h.client.snapshot().is_logged_in);
    }

    #[tokio::test]
    async fn test_fetch_profile_without_token_sends_nothing() {
        let h = start(FakeApi::seeded(), MemoryTokenStore::new());

        let result = h.client.dispatch(SessionAction::FetchProfile).await;

        assert!(matches!(result, Err(SessionError::NotAuthenticated)));
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_restored_token_logs_in_only_after_profile_fetch() {
        let api = FakeApi::seeded();
        let user = api.add_account("ann@example.com", "password1", "Ann", "Lee");
        let token = api.issue_token(user.id);
        let h = start(api, MemoryTokenStore::with_token(token.expose()));

        let before = h.client.snapshot();
        assert_eq!(before.token, Some(token));
        assert!(!before.is_logged_in);

        h.client.dispatch(SessionAction::FetchProfile).await.unwrap();
        assert!(h.client.snapshot().is_logged_in);
    }

    #[tokio::test]
    async fn test_failed_profile_fetch_keeps_token() {
        let mut h = start(FakeApi::seeded(), MemoryTokenStore::with_token("expired"));

        let result = h.client.dispatch(SessionAction::FetchProfile).await;

        assert!(result.is_err());
        let state = h.client.snapshot();
        assert_eq!(state.token, Some(AccessToken::new("expired")));
        assert!(!state.is_logged_in);
        assert!(!state.loading);
        assert_eq!(h.notes.recv().await.unwrap().kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_update_profile_merges_stored_fields() {
        let api = FakeApi::seeded();
        api.add_account("ann@example.com", "password1", "Ann", "Lee");
        let h = start(api, MemoryTokenStore::new());
        h.client
            .dispatch(SessionAction::Login(Credentials::new(
                "ann@example.com",
                "password1",
            )))
            .await
            .unwrap();

        let profile = h
            .client
            .dispatch(SessionAction::UpdateProfile(ProfileUpdate {
                phone: Some("+1 555 0100".into()),
                ..ProfileUpdate::default()
            }))
            .await
            .unwrap();

        assert_eq!(profile.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(profile.full_name, "Ann Lee");
    }

    #[tokio::test]
    async fn test_refresh_replaces_and_persists_access_token() {
        let api = FakeApi::seeded();
        api.add_account("ann@example.com", "password1", "Ann", "Lee");
        let h = start(api, MemoryTokenStore::new());
        h.client
            .dispatch(SessionAction::Login(Credentials::new(
                "ann@example.com",
                "password1",
            )))
            .await
            .unwrap();
        let old = h.client.snapshot().token;

        h.client.dispatch(SessionAction::RefreshAccess).await.unwrap();

        let new = h.client.snapshot().token;
        assert_ne!(new, old);
        assert_eq!(h.tokens.load().unwrap(), new);
    }

    #[tokio::test]
    async fn test_logout_clears_everything_and_announces() {
        let mut h = start(FakeApi::seeded(), MemoryTokenStore::with_token("t"));

        h.client.dispatch(SessionAction::Logout).await.unwrap();

        assert_eq!(h.client.snapshot(), SessionState::default());
        assert!(h.tokens.load().unwrap().is_none());
        assert_eq!(h.events.recv().await.unwrap(), SessionEvent::LoggedOut);
    }
}
