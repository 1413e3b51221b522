//! Durable key-value storage for credentials and preferences.
//!
//! The trait seam lets the stores and the API client share one storage
//! instance without caring whether it is backed by the filesystem or held
//! in memory (tests). Keys are the fixed strings in
//! [`crate::constants::storage_keys`].

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::ClientError;

/// Durable string-keyed storage surviving process restarts.
///
/// Only the store layer may mutate entries; presentation code reads state
/// through store snapshots instead.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    async fn delete(&self, key: &str) -> Result<(), ClientError>;
}

/// Filesystem-backed store: one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    dir: PathBuf,
}

impl FileKeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Keys contain a namespace separator; flatten it for the filename.
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key.replace(['/', '\\'], "."))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ClientError::Storage(format!(
                "failed to read key {}: {}",
                key, err
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|err| {
            ClientError::Storage(format!("failed to create storage directory: {}", err))
        })?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|err| ClientError::Storage(format!("failed to write key {}: {}", key, err)))
    }

    async fn delete(&self, key: &str) -> Result<(), ClientError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ClientError::Storage(format!(
                "failed to delete key {}: {}",
                key, err
            ))),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ClientError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage_keys;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryKeyStore::new();
        assert_eq!(store.get(storage_keys::AUTH_TOKEN).await.unwrap(), None);

        store.set(storage_keys::AUTH_TOKEN, "tok123").await.unwrap();
        assert_eq!(
            store.get(storage_keys::AUTH_TOKEN).await.unwrap(),
            Some("tok123".to_string())
        );

        store.delete(storage_keys::AUTH_TOKEN).await.unwrap();
        assert_eq!(store.get(storage_keys::AUTH_TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());

        store.set(storage_keys::AUTH_TOKEN, "tok123").await.unwrap();
        assert_eq!(
            store.get(storage_keys::AUTH_TOKEN).await.unwrap(),
            Some("tok123".to_string())
        );

        // Survives a new handle over the same directory.
        let reopened = FileKeyStore::new(dir.path());
        assert_eq!(
            reopened.get(storage_keys::AUTH_TOKEN).await.unwrap(),
            Some("tok123".to_string())
        );
    }

    #[tokio::test]
    async fn file_store_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());

        store.delete(storage_keys::USER_DATA).await.unwrap();
        store.set(storage_keys::USER_DATA, "{}").await.unwrap();
        store.delete(storage_keys::USER_DATA).await.unwrap();
        store.delete(storage_keys::USER_DATA).await.unwrap();
        assert_eq!(store.get(storage_keys::USER_DATA).await.unwrap(), None);
    }

    #[tokio::test]
    async fn namespaced_keys_do_not_create_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());
        store.set("flexdoc/theme", "dark").await.unwrap();
        assert!(dir.path().join("flexdoc.theme").exists());
    }
}
