use async_trait::async_trait;
use store_framework::{FrameworkError, StateCell, StoreActor, StoreHandle, StoreState};

// --- Test Store ---

#[derive(Clone, Debug, Default, PartialEq)]
struct Profile {
    name: Option<String>,
    is_admin: bool,
    loading: bool,
}

#[derive(Debug)]
enum ProfileAction {
    SignIn(String),
    PromoteToAdmin,
    SignOut,
}

#[derive(Debug, thiserror::Error)]
enum ProfileError {
    #[error("Not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

#[async_trait]
impl StoreState for Profile {
    type Action = ProfileAction;
    type ActionResult = bool;
    type Context = ();
    type Error = ProfileError;

    async fn handle_action(
        cell: &StateCell<Self>,
        action: ProfileAction,
        _ctx: &Self::Context,
    ) -> Result<bool, ProfileError> {
        let _loading = cell.begin_loading(|s| &mut s.loading);
        match action {
            ProfileAction::SignIn(name) => {
                cell.update(|s| s.name = Some(name));
                Ok(true)
            }
            ProfileAction::PromoteToAdmin => {
                if cell.read(|s| s.name.is_none()) {
                    return Err(ProfileError::NotSignedIn);
                }
                if cell.read(|s| s.is_admin) {
                    Ok(false)
                } else {
                    cell.update(|s| s.is_admin = true);
                    Ok(true)
                }
            }
            ProfileAction::SignOut => {
                cell.replace(Profile::default());
                Ok(true)
            }
        }
    }
}

struct ProfileClient {
    inner: store_framework::StoreClient<Profile>,
}

impl StoreHandle<Profile> for ProfileClient {
    fn inner(&self) -> &store_framework::StoreClient<Profile> {
        &self.inner
    }
}

// --- Test ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    // Start Actor
    let (actor, client) = StoreActor::<Profile>::new(10);
    let handle = tokio::spawn(actor.run(()));

    // 1. Action before sign-in fails and leaves state untouched
    let result = client.dispatch(ProfileAction::PromoteToAdmin).await;
    assert!(matches!(result, Err(ProfileError::NotSignedIn)));
    assert_eq!(client.snapshot(), Profile::default());

    // 2. Sign in
    assert!(client
        .dispatch(ProfileAction::SignIn("Alice".into()))
        .await
        .unwrap());

    // 3. Promote, then promote again (no change)
    assert!(client.dispatch(ProfileAction::PromoteToAdmin).await.unwrap());
    assert!(!client.dispatch(ProfileAction::PromoteToAdmin).await.unwrap());

    // Verify state through the handle trait
    let profile_client = ProfileClient {
        inner: client.clone(),
    };
    let state = profile_client.settled().await.unwrap();
    assert_eq!(state.name.as_deref(), Some("Alice"));
    assert!(state.is_admin);
    assert!(!state.loading);

    // 4. Fire-and-forget sign-out is visible once the mailbox has drained
    client.send(ProfileAction::SignOut).await.unwrap();
    assert_eq!(profile_client.settled().await.unwrap(), Profile::default());

    // 5. Dropping every client stops the actor
    drop(profile_client);
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_subscribers_see_every_published_change() {
    let (actor, client) = StoreActor::<Profile>::new(10);
    tokio::spawn(actor.run(()));
    let mut rx = client.subscribe();

    client
        .send(ProfileAction::SignIn("Bob".into()))
        .await
        .unwrap();

    let seen = rx
        .wait_for(|s| s.name.as_deref() == Some("Bob") && !s.loading)
        .await
        .unwrap()
        .clone();
    assert!(!seen.is_admin);
}

#[tokio::test]
async fn test_dispatch_after_shutdown_reports_closed_store() {
    let (actor, client) = StoreActor::<Profile>::new(1);
    drop(actor);

    let result = client.dispatch(ProfileAction::SignOut).await;
    assert!(matches!(
        result,
        Err(ProfileError::Framework(FrameworkError::StoreClosed))
    ));
    assert_eq!(client.settled().await, Err(FrameworkError::StoreClosed));
}
