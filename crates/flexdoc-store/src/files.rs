//! File registry store: the converted-file list and the upload-progress slot.
//!
//! The registry mirrors the backend listing; newly converted files are
//! prepended so the newest entry is first (a display convention enforced
//! here, not by the server). The progress percentage is synthetic: a timer
//! advances it while the conversion request is outstanding, because the
//! backend offers no real progress reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flexdoc_client::{ApiClient, FilePayload};
use flexdoc_core::models::{ConversionType, ConvertedFile, UploadProgress, UploadStatus};
use flexdoc_core::ClientError;

use crate::lock_state;

const TICK_INTERVAL: Duration = Duration::from_millis(200);
/// Ticks until the synthetic phase flips from uploading to converting (~1s).
const CONVERTING_AFTER_TICKS: u32 = 5;
const SUCCESS_CLEAR_DELAY: Duration = Duration::from_secs(2);
const ERROR_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// In-memory registry state. Obtain via [`FileStore::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct FilesState {
    pub files: Vec<ConvertedFile>,
    pub is_loading: bool,
    pub is_uploading: bool,
    pub error: Option<String>,
    pub upload_progress: Option<UploadProgress>,
}

pub struct FileStore {
    client: Arc<ApiClient>,
    state: Arc<Mutex<FilesState>>,
    /// Bumped per conversion so a delayed clear never wipes a newer slot.
    progress_epoch: Arc<AtomicU64>,
}

impl FileStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(FilesState::default())),
            progress_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn snapshot(&self) -> FilesState {
        lock_state(&self.state).clone()
    }

    pub fn files(&self) -> Vec<ConvertedFile> {
        lock_state(&self.state).files.clone()
    }

    pub fn upload_progress(&self) -> Option<UploadProgress> {
        lock_state(&self.state).upload_progress.clone()
    }

    pub fn clear_error(&self) {
        lock_state(&self.state).error = None;
    }

    pub fn reset_upload_progress(&self) {
        lock_state(&self.state).upload_progress = None;
    }

    /// Replace the registry with the server's current listing. On failure
    /// the previous list stays untouched and the error is recorded.
    pub async fn fetch_files(&self) -> Result<Vec<ConvertedFile>, ClientError> {
        {
            let mut state = lock_state(&self.state);
            state.is_loading = true;
            state.error = None;
        }

        match self.client.list_files().await {
            Ok(listing) => {
                let mut state = lock_state(&self.state);
                state.files = listing.files.clone();
                state.is_loading = false;
                tracing::info!(count = listing.files.len(), "file listing refreshed");
                Ok(listing.files)
            }
            Err(err) => {
                let mut state = lock_state(&self.state);
                state.is_loading = false;
                state.error = Some(err.to_string());
                tracing::warn!(error = %err, "failed to fetch files");
                Err(err)
            }
        }
    }

    /// Upload a file for conversion, driving the upload-progress slot
    /// through its lifecycle. The slot is guaranteed to be in a terminal
    /// state (success or error) before this returns. On success the new
    /// record is prepended to the registry.
    ///
    /// At most one conversion may be in flight per store; a concurrent call
    /// is rejected with [`ClientError::ConversionInProgress`] without
    /// touching the active slot.
    pub async fn convert_file(
        &self,
        payload: &FilePayload,
        conversion_type: ConversionType,
    ) -> Result<ConvertedFile, ClientError> {
        {
            let mut state = lock_state(&self.state);
            if state.is_uploading {
                return Err(ClientError::ConversionInProgress);
            }
            state.is_uploading = true;
            state.error = None;
            state.upload_progress = Some(UploadProgress::started(&payload.file_name));
        }
        let epoch = self.progress_epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let ticker = self.spawn_progress_ticker();
        let result = self.client.convert_file(payload, conversion_type).await;
        ticker.abort();

        match result {
            Ok(response) => {
                let file = response.file;
                {
                    let mut state = lock_state(&self.state);
                    state.upload_progress = Some(UploadProgress::succeeded(&payload.file_name));
                    state.files.insert(0, file.clone());
                    state.is_uploading = false;
                }
                self.spawn_progress_clear(epoch, SUCCESS_CLEAR_DELAY);
                tracing::info!(
                    file_id = %file.id,
                    converted = %file.converted_filename,
                    "file converted"
                );
                Ok(file)
            }
            Err(err) => {
                let message = err.to_string();
                {
                    let mut state = lock_state(&self.state);
                    state.upload_progress =
                        Some(UploadProgress::failed(&payload.file_name, &message));
                    state.is_uploading = false;
                    state.error = Some(message.clone());
                }
                self.spawn_progress_clear(epoch, ERROR_CLEAR_DELAY);
                tracing::warn!(error = %err, file = %payload.file_name, "conversion failed");
                Err(err)
            }
        }
    }

    /// Delete a file on the server, then remove it from the registry.
    /// Removal happens only after the server confirms; there is no
    /// optimistic removal and no tombstoning. A server-confirmed delete of
    /// an id the registry never held is a local no-op.
    pub async fn delete_file(&self, file_id: &str) -> Result<(), ClientError> {
        lock_state(&self.state).error = None;

        match self.client.delete_file(file_id).await {
            Ok(_confirmation) => {
                let mut state = lock_state(&self.state);
                state.files.retain(|file| file.id != file_id);
                tracing::info!(file_id, "file deleted");
                Ok(())
            }
            Err(err) => {
                lock_state(&self.state).error = Some(err.to_string());
                tracing::warn!(file_id, error = %err, "failed to delete file");
                Err(err)
            }
        }
    }

    /// Advance the synthetic percentage while the request is outstanding:
    /// +10 every 200ms up to 80, then "converting" at 80 after ~1s. Aborted
    /// by `convert_file` as soon as the request settles.
    fn spawn_progress_ticker(&self) -> tokio::task::JoinHandle<()> {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let mut ticks = 0u32;
            loop {
                tokio::time::sleep(TICK_INTERVAL).await;
                ticks += 1;

                let mut guard = lock_state(&state);
                let Some(progress) = guard.upload_progress.as_mut() else {
                    break;
                };
                if progress.status.is_terminal() {
                    break;
                }
                if ticks >= CONVERTING_AFTER_TICKS {
                    progress.status = UploadStatus::Converting;
                    progress.progress = 80;
                } else if progress.progress < 80 {
                    progress.progress += 10;
                }
            }
        })
    }

    /// Clear the slot a moment after it reaches a terminal state, unless a
    /// newer conversion has taken it over in the meantime.
    fn spawn_progress_clear(&self, epoch: u64, delay: Duration) {
        let state = Arc::clone(&self.state);
        let current_epoch = Arc::clone(&self.progress_epoch);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current_epoch.load(Ordering::SeqCst) == epoch {
                lock_state(&state).upload_progress = None;
            }
        });
    }
}
