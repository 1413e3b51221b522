//! HTTP client for the FlexDoc conversion API.
//!
//! Provides a client with generic GET/POST/DELETE helpers and domain methods
//! (signup, login, convert, list, delete). Every request that is not
//! signup/login carries the bearer credential read from durable storage; a
//! missing credential simply omits the header. Failures are normalized into
//! [`ClientError`], and a 401 response evicts the stored session and emits a
//! [`AuthEvent::SessionEvicted`] event before the error propagates.

pub mod api;
pub mod events;

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use flexdoc_core::constants::{storage_keys, GENERIC_ERROR_MESSAGE};
use flexdoc_core::{ClientConfig, ClientError, KeyValueStore};

pub use api::FilePayload;
pub use events::{AuthEvent, AuthEventSender};

/// Error body shape returned by the backend on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the FlexDoc API with stored-credential auth.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    keystore: Arc<dyn KeyValueStore>,
    events: AuthEventSender,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        keystore: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ClientError::Transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            keystore,
            events: AuthEventSender::new(),
        })
    }

    /// Create a client from `FLEXDOC_API_URL` / `FLEXDOC_TIMEOUT_SECS`.
    pub fn from_env(keystore: Arc<dyn KeyValueStore>) -> Result<Self, ClientError> {
        Self::new(&ClientConfig::from_env(), keystore)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Subscribe to session-eviction events emitted on 401 responses.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// Read the stored bearer credential. Absence means the Authorization
    /// header is omitted, not an error; a storage failure is logged and
    /// treated the same way.
    async fn bearer_token(&self) -> Option<String> {
        match self.keystore.get(storage_keys::AUTH_TOKEN).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(%err, "failed to read stored credential");
                None
            }
        }
    }

    async fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET request. Deserializes the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.http.get(self.build_url(path));
        let request = self.apply_auth(request).await;
        self.execute(request).await
    }

    /// POST a JSON body and deserialize the response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self.http.post(self.build_url(path)).json(body);
        let request = self.apply_auth(request).await;
        self.execute(request).await
    }

    /// POST a multipart form and deserialize the response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let request = self.http.post(self.build_url(path)).multipart(form);
        let request = self.apply_auth(request).await;
        self.execute(request).await
    }

    /// DELETE request. Deserializes the JSON response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.http.delete(self.build_url(path));
        let request = self.apply_auth(request).await;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| ClientError::Decode(format!("failed to parse response: {err}")))
        } else {
            Err(self.error_from_response(status, response).await)
        }
    }

    /// Normalize a non-2xx response. Message precedence: server-provided
    /// `detail`, then the transport-level status description, then a generic
    /// fallback. The status code is always preserved.
    async fn error_from_response(&self, status: StatusCode, response: Response) -> ClientError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.detail)
            .ok()
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

        match status {
            StatusCode::UNAUTHORIZED => {
                // The stored session is no longer valid; evict it before the
                // error reaches the caller so subsequent restores see logged-out.
                self.evict_session().await;
                ClientError::AuthExpired { message }
            }
            StatusCode::NOT_FOUND => {
                tracing::debug!(%status, %message, "resource not found");
                ClientError::Server {
                    message,
                    status_code: status.as_u16(),
                }
            }
            status if status.is_server_error() => {
                tracing::error!(%status, %message, "server error");
                ClientError::Server {
                    message,
                    status_code: status.as_u16(),
                }
            }
            status => ClientError::Server {
                message,
                status_code: status.as_u16(),
            },
        }
    }

    /// Delete the durable credential and cached user record, then notify
    /// subscribers. Deletion failures are logged; eviction still proceeds.
    async fn evict_session(&self) {
        for key in [storage_keys::AUTH_TOKEN, storage_keys::USER_DATA] {
            if let Err(err) = self.keystore.delete(key).await {
                tracing::warn!(key, %err, "failed to delete stored session entry");
            }
        }
        self.events.send(AuthEvent::SessionEvicted);
        tracing::info!("stored session evicted after authentication rejection");
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(err.to_string())
    }
}
