//! Session store: authenticated identity, credential, and their lifecycle.
//!
//! Four logical states: anonymous (initial), authenticating (an operation in
//! flight), authenticated (user + token present), and back to anonymous on
//! logout or a 401-triggered eviction. The credential and the cached user
//! record are persisted to durable storage on every successful populate and
//! erased on logout or eviction.

use std::sync::{Arc, Mutex};

use flexdoc_client::{ApiClient, AuthEvent};
use flexdoc_core::constants::storage_keys;
use flexdoc_core::models::{LoginRequest, SignupRequest, User};
use flexdoc_core::validation::{validate_login, validate_signup};
use flexdoc_core::{ClientError, KeyValueStore};
use tokio::sync::broadcast::error::RecvError;

use crate::lock_state;

/// In-memory session state. Obtain via [`SessionStore::snapshot`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl SessionState {
    /// True iff both the user record and the credential are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

pub struct SessionStore {
    client: Arc<ApiClient>,
    keystore: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new(client: Arc<ApiClient>, keystore: Arc<dyn KeyValueStore>) -> Self {
        Self {
            client,
            keystore,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        lock_state(&self.state).clone()
    }

    /// Clear `last_error` so a stale message does not linger before the next
    /// attempt. No other side effects.
    pub fn clear_error(&self) {
        lock_state(&self.state).last_error = None;
    }

    /// Authenticate and persist the session. On failure the loading flag is
    /// cleared, the message lands in `last_error`, and the error is
    /// re-raised for the caller to display.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ClientError> {
        self.begin_operation();
        match self.login_inner(request).await {
            Ok(user) => Ok(user),
            Err(err) => Err(self.fail_operation(err)),
        }
    }

    /// Register, then immediately log in with the same credentials. The
    /// backend's signup response carries no token, so the chained login is
    /// what actually establishes the session. Either phase failing surfaces
    /// as a single error.
    pub async fn signup(&self, request: &SignupRequest) -> Result<User, ClientError> {
        self.begin_operation();
        match self.signup_inner(request).await {
            Ok(user) => Ok(user),
            Err(err) => Err(self.fail_operation(err)),
        }
    }

    /// Best-effort removal of durable entries; in-memory state always resets
    /// to anonymous even if durable deletion fails (that failure is logged,
    /// not surfaced). Idempotent.
    pub async fn logout(&self) {
        for key in [storage_keys::AUTH_TOKEN, storage_keys::USER_DATA] {
            if let Err(err) = self.keystore.delete(key).await {
                tracing::warn!(key, %err, "failed to delete stored session entry on logout");
            }
        }
        *lock_state(&self.state) = SessionState::default();
        tracing::info!("logged out");
    }

    /// Restore a persisted session without a network call. An expired token
    /// is only discovered on the next API call that returns 401. Returns
    /// whether a session was restored.
    pub async fn restore_session(&self) -> bool {
        lock_state(&self.state).is_loading = true;

        let token = self.read_stored(storage_keys::AUTH_TOKEN).await;
        let user_json = self.read_stored(storage_keys::USER_DATA).await;

        let restored = match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => {
                    let mut state = lock_state(&self.state);
                    state.user = Some(user);
                    state.token = Some(token);
                    tracing::info!("session restored from durable storage");
                    true
                }
                Err(err) => {
                    tracing::warn!(%err, "stored user record is malformed; staying anonymous");
                    false
                }
            },
            _ => {
                tracing::debug!("no stored session found");
                false
            }
        };

        lock_state(&self.state).is_loading = false;
        restored
    }

    /// Listen for 401-triggered evictions from the API boundary and reset
    /// the in-memory session to anonymous when one arrives. The task ends
    /// when the store is dropped.
    pub fn spawn_eviction_listener(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let mut events = self.client.subscribe();
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AuthEvent::SessionEvicted) => {
                        let Some(store) = store.upgrade() else { break };
                        *lock_state(&store.state) = SessionState::default();
                        tracing::info!("in-memory session cleared after eviction");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "missed auth events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    fn begin_operation(&self) {
        let mut state = lock_state(&self.state);
        state.is_loading = true;
        state.last_error = None;
    }

    fn fail_operation(&self, err: ClientError) -> ClientError {
        let mut state = lock_state(&self.state);
        state.is_loading = false;
        state.last_error = Some(err.to_string());
        tracing::warn!(error = %err, "auth operation failed");
        err
    }

    async fn login_inner(&self, request: &LoginRequest) -> Result<User, ClientError> {
        validate_login(request)?;

        let response = self.client.login(request).await?;

        // Durable write strictly precedes the in-memory transition.
        self.keystore
            .set(storage_keys::AUTH_TOKEN, &response.token)
            .await?;
        let user_json = serde_json::to_string(&response.user)?;
        self.keystore
            .set(storage_keys::USER_DATA, &user_json)
            .await?;

        let mut state = lock_state(&self.state);
        state.user = Some(response.user.clone());
        state.token = Some(response.token);
        state.is_loading = false;
        state.last_error = None;
        tracing::info!(email = %request.email, "login succeeded");
        Ok(response.user)
    }

    async fn signup_inner(&self, request: &SignupRequest) -> Result<User, ClientError> {
        validate_signup(request)?;

        self.client.signup(request).await?;
        tracing::info!(email = %request.email, "signup succeeded, logging in");

        self.login_inner(&LoginRequest {
            email: request.email.clone(),
            password: request.password.clone(),
        })
        .await
    }

    async fn read_stored(&self, key: &str) -> Option<String> {
        match self.keystore.get(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "failed to read durable storage");
                None
            }
        }
    }
}
