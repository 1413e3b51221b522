use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a server-side conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// One converted-file record, mirrored from the backend into the registry.
///
/// `conversion_type` stays a plain string on the wire so an unknown tag from
/// a newer backend does not break deserialization of the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedFile {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub original_filename: String,
    pub converted_filename: String,
    pub file_type: String,
    pub conversion_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    pub cloud_url: String,
    pub status: FileStatus,
    pub created_at: DateTime<Utc>,
}

/// POST /api/convert response. The backend converts synchronously and
/// returns the finished artifact in the same response; there is no polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub success: bool,
    pub message: String,
    pub file: ConvertedFile,
}

/// GET /api/files response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesListResponse {
    pub success: bool,
    pub count: usize,
    pub files: Vec<ConvertedFile>,
}

/// DELETE /api/files/{id} response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub success: bool,
    pub message: String,
    pub file_id: String,
}
