use serde::{Deserialize, Serialize};

/// Phase of the single upload-progress slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Idle,
    Uploading,
    Converting,
    Success,
    Error,
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Success | UploadStatus::Error)
    }
}

/// Progress of the in-flight conversion, if any.
///
/// The percentage is a synthetic approximation driven by a timer while the
/// request is outstanding, not a measurement of bytes on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress {
    pub file_name: String,
    /// 0-100.
    pub progress: u8,
    pub status: UploadStatus,
    pub error: Option<String>,
}

impl UploadProgress {
    /// Fresh slot at the start of an upload.
    pub fn started(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            progress: 0,
            status: UploadStatus::Uploading,
            error: None,
        }
    }

    pub fn succeeded(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            progress: 100,
            status: UploadStatus::Success,
            error: None,
        }
    }

    pub fn failed(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            progress: 0,
            status: UploadStatus::Error,
            error: Some(message.into()),
        }
    }
}
