//! Domain methods for the FlexDoc API client.
//!
//! Request/response types live in `flexdoc_core::models`; this module maps
//! the five backend operations onto the generic helpers in [`crate::ApiClient`].

use std::path::{Component, Path};

use flexdoc_core::constants::{endpoints, limits};
use flexdoc_core::models::{
    ConversionResponse, ConversionType, DeleteFileResponse, FilesListResponse, LoginRequest,
    LoginResponse, SignupRequest, User,
};
use flexdoc_core::ClientError;

use crate::ApiClient;

/// In-memory file payload for a conversion request.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a payload from a local file, inferring the MIME type from the
    /// extension.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(ClientError::InvalidInput(format!(
                "Invalid input path: {}",
                path.display()
            )));
        }

        let bytes = std::fs::read(path).map_err(|err| {
            ClientError::InvalidInput(format!("Failed to read {}: {}", path.display(), err))
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::InvalidInput(format!("No file name in path: {}", path.display()))
            })?
            .to_string();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        Ok(Self::new(file_name, mime_for_extension(&extension), bytes))
    }

    /// Size and extension limits, checked before any network call.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.file_name.is_empty() {
            return Err(ClientError::InvalidInput(
                "File name must not be empty".to_string(),
            ));
        }
        if self.bytes.len() > limits::MAX_FILE_SIZE_BYTES {
            return Err(ClientError::InvalidInput(format!(
                "File exceeds the {} MB upload limit",
                limits::MAX_FILE_SIZE_BYTES / (1024 * 1024)
            )));
        }
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !limits::ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ClientError::InvalidInput(format!(
                "Unsupported file type: .{}",
                extension
            )));
        }
        Ok(())
    }
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "zip" => "application/zip",
        "md" => "text/markdown",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// Register a new account. The backend returns the created user without
    /// a token; logging in is a separate step.
    pub async fn signup(&self, request: &SignupRequest) -> Result<User, ClientError> {
        self.post_json(endpoints::SIGNUP, request).await
    }

    /// Exchange credentials for the account record plus a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.post_json(endpoints::LOGIN, request).await
    }

    /// Submit a file for conversion. The backend converts synchronously and
    /// returns the finished artifact in the same response.
    pub async fn convert_file(
        &self,
        payload: &FilePayload,
        conversion_type: ConversionType,
    ) -> Result<ConversionResponse, ClientError> {
        payload.validate()?;

        let part = reqwest::multipart::Part::bytes(payload.bytes.clone())
            .file_name(payload.file_name.clone())
            .mime_str(&payload.mime_type)
            .map_err(|err| {
                ClientError::InvalidInput(format!("Invalid MIME type {}: {}", payload.mime_type, err))
            })?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("conversion_type", conversion_type.as_str());

        self.post_multipart(endpoints::CONVERT, form).await
    }

    /// List all converted files belonging to the current session.
    pub async fn list_files(&self) -> Result<FilesListResponse, ClientError> {
        self.get(endpoints::FILES).await
    }

    /// Delete a converted file by id.
    pub async fn delete_file(&self, file_id: &str) -> Result<DeleteFileResponse, ClientError> {
        self.delete(&endpoints::file_by_id(file_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_rejects_oversized_files() {
        let payload = FilePayload::new(
            "big.pdf",
            "application/pdf",
            vec![0u8; limits::MAX_FILE_SIZE_BYTES + 1],
        );
        let err = payload.validate().unwrap_err();
        assert!(err.to_string().contains("50 MB"));
    }

    #[test]
    fn payload_rejects_unsupported_extension() {
        let payload = FilePayload::new("tune.mp3", "audio/mpeg", vec![1, 2, 3]);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_accepts_known_types() {
        for name in ["a.pdf", "b.docx", "c.XLSX", "d.md"] {
            let payload = FilePayload::new(name, "application/octet-stream", vec![0u8; 16]);
            assert!(payload.validate().is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn from_path_rejects_parent_components() {
        let err = FilePayload::from_path(Path::new("../etc/passwd")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn mime_inference_covers_catalog() {
        assert_eq!(mime_for_extension("pdf"), "application/pdf");
        assert_eq!(mime_for_extension("jpeg"), "image/jpeg");
        assert_eq!(mime_for_extension("weird"), "application/octet-stream");
    }
}
