//! State stores for the FlexDoc client
//!
//! Three injectable service objects sit between the UI and the API boundary:
//! [`SessionStore`] owns the authenticated identity and credential,
//! [`FileStore`] owns the converted-file registry and the single
//! upload-progress slot, and [`PreferencesStore`] owns theme and onboarding
//! preferences. Stores are independent of each other; each wraps the shared
//! [`flexdoc_client::ApiClient`] and the durable
//! [`flexdoc_core::KeyValueStore`]. Construct one instance per app (or per
//! test) rather than relying on globals.

mod files;
mod prefs;
mod session;

pub use files::{FileStore, FilesState};
pub use prefs::{Preferences, PreferencesStore, Theme};
pub use session::{SessionState, SessionStore};

use std::sync::{Mutex, MutexGuard};

/// Lock helper: a poisoned lock only means another task panicked mid-update;
/// the state itself is still plain data we can keep serving.
pub(crate) fn lock_state<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
