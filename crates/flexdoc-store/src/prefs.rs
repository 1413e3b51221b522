//! Preferences store: theme and onboarding flag, persisted to durable
//! storage under fixed keys. Storage failures here are logged, never
//! surfaced; a lost theme write is not worth interrupting the user over.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use flexdoc_core::constants::storage_keys;
use flexdoc_core::{ClientError, KeyValueStore};

use crate::lock_state;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ClientError::InvalidInput(format!(
                "Unknown theme: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub onboarding_completed: bool,
}

pub struct PreferencesStore {
    keystore: Arc<dyn KeyValueStore>,
    state: Mutex<Preferences>,
}

impl PreferencesStore {
    pub fn new(keystore: Arc<dyn KeyValueStore>) -> Self {
        Self {
            keystore,
            state: Mutex::new(Preferences::default()),
        }
    }

    pub fn snapshot(&self) -> Preferences {
        *lock_state(&self.state)
    }

    pub fn theme(&self) -> Theme {
        lock_state(&self.state).theme
    }

    /// Load persisted preferences. Missing or unparseable entries leave the
    /// defaults in place.
    pub async fn load(&self) {
        if let Some(raw) = self.read(storage_keys::THEME).await {
            match raw.parse::<Theme>() {
                Ok(theme) => lock_state(&self.state).theme = theme,
                Err(err) => tracing::warn!(%err, "ignoring stored theme"),
            }
        }
        if let Some(raw) = self.read(storage_keys::ONBOARDING_COMPLETED).await {
            lock_state(&self.state).onboarding_completed = raw == "true";
        }
    }

    /// Persist then apply. If the write fails the in-memory value is left
    /// unchanged so memory and storage stay consistent.
    pub async fn set_theme(&self, theme: Theme) {
        match self.keystore.set(storage_keys::THEME, theme.as_str()).await {
            Ok(()) => lock_state(&self.state).theme = theme,
            Err(err) => tracing::warn!(%err, "failed to persist theme"),
        }
    }

    pub async fn toggle_theme(&self) {
        let next = self.theme().toggled();
        self.set_theme(next).await;
    }

    pub async fn set_onboarding_completed(&self, completed: bool) {
        let value = if completed { "true" } else { "false" };
        match self
            .keystore
            .set(storage_keys::ONBOARDING_COMPLETED, value)
            .await
        {
            Ok(()) => lock_state(&self.state).onboarding_completed = completed,
            Err(err) => tracing::warn!(%err, "failed to persist onboarding flag"),
        }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.keystore.get(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "failed to read preference");
                None
            }
        }
    }
}
