//! Fixed constants: endpoint paths, durable-storage keys, and file limits.
//!
//! Only the API base URL and request timeout are environment-configurable
//! (see [`crate::config`]); everything here is a fixed part of the contract
//! with the backend.

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const SIGNUP: &str = "/api/signup";
    pub const LOGIN: &str = "/api/login";
    pub const CONVERT: &str = "/api/convert";
    pub const FILES: &str = "/api/files";

    pub fn file_by_id(id: &str) -> String {
        format!("{}/{}", FILES, id)
    }
}

/// Durable-storage keys, all under a common namespace prefix.
pub mod storage_keys {
    pub const AUTH_TOKEN: &str = "flexdoc/auth_token";
    pub const USER_DATA: &str = "flexdoc/user_data";
    pub const THEME: &str = "flexdoc/theme";
    pub const ONBOARDING_COMPLETED: &str = "flexdoc/onboarding_completed";
}

/// Upload constraints enforced client-side before any network call.
pub mod limits {
    /// Maximum upload size: 50 MB.
    pub const MAX_FILE_SIZE_BYTES: usize = 50 * 1024 * 1024;

    pub const ALLOWED_EXTENSIONS: &[&str] = &[
        "pdf", "docx", "doc", "xlsx", "xls", "jpg", "jpeg", "png", "gif", "zip", "md", "txt",
    ];
}

/// Fallback message when neither the server nor the transport provides one.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_by_id_builds_path() {
        assert_eq!(endpoints::file_by_id("68a1b2"), "/api/files/68a1b2");
    }

    #[test]
    fn storage_keys_share_namespace() {
        for key in [
            storage_keys::AUTH_TOKEN,
            storage_keys::USER_DATA,
            storage_keys::THEME,
            storage_keys::ONBOARDING_COMPLETED,
        ] {
            assert!(key.starts_with("flexdoc/"));
        }
    }
}
