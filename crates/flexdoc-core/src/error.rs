//! Error types module
//!
//! All failures surfaced by the FlexDoc client are unified under the
//! `ClientError` enum: server rejections (with their HTTP status preserved),
//! transport failures, client-side validation errors, and durable-storage
//! errors. Nothing in this taxonomy is fatal; every variant is recoverable
//! by retrying the user action.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the request with a structured error response.
    #[error("{message}")]
    Server { message: String, status_code: u16 },

    /// The server returned 401. The stored credential has already been
    /// evicted by the time this error reaches the caller.
    #[error("{message}")]
    AuthExpired { message: String },

    /// No response received: offline, DNS failure, connection refused.
    #[error("Network error: {0}")]
    Transport(String),

    /// The request exceeded the configured overall timeout.
    #[error("Request timed out")]
    Timeout,

    /// Rejected client-side before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Durable key-value storage read/write failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A response or stored record could not be parsed.
    #[error("Malformed data: {0}")]
    Decode(String),

    /// A conversion is already in flight; the registry supports one at a time.
    #[error("A conversion is already in progress")]
    ConversionInProgress,
}

impl ClientError {
    /// HTTP status code, when the failure carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Server { status_code, .. } => Some(*status_code),
            ClientError::AuthExpired { .. } => Some(401),
            _ => None,
        }
    }

    /// True when the server rejected the stored credential (HTTP 401).
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ClientError::AuthExpired { .. })
    }

    /// True for failures that never reached the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidInput(_)
                | ClientError::Storage(_)
                | ClientError::ConversionInProgress
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        for (field, errors) in err.field_errors() {
            for error in errors {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("{} is invalid", field)),
                }
            }
        }
        messages.sort();
        ClientError::InvalidInput(messages.join("; "))
    }
}
