//! Persisted application settings.
//!
//! The whole record is one JSON document under a fixed key. It is read once
//! when the store opens and rewritten in full after every mutation. There is
//! a single logical writer; concurrent writers would simply overwrite each
//! other.

pub mod error;
mod storage;

pub use error::SettingsError;
pub use storage::{FileStorage, MemoryStorage, SettingsStorage};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Storage key of the settings document.
pub const SETTINGS_KEY: &str = "db37c8";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Paths remembered between sessions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    /// Last directory converted files were written to
    pub converted: Option<String>,
}

/// Whether the help/info popups are still shown
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popups {
    pub help: bool,
    pub info: bool,
}

impl Default for Popups {
    fn default() -> Self {
        Self {
            help: true,
            info: true,
        }
    }
}

/// The persisted settings record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub paths: Paths,
    pub popups: Popups,
}

/// In-memory settings backed by a [`SettingsStorage`].
pub struct SettingsStore<B> {
    current: RwLock<Settings>,
    storage: B,
    key: String,
}

impl<B: SettingsStorage> SettingsStore<B> {
    /// Read the record once from `storage`.
    ///
    /// A missing, unreadable or malformed document is replaced by the
    /// default record. Nothing is written until the first mutation.
    pub fn open(storage: B) -> Self {
        Self::open_with_key(storage, SETTINGS_KEY)
    }

    pub fn open_with_key(storage: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = load(&storage, &key);
        Self {
            current: RwLock::new(current),
            storage,
            key,
        }
    }

    /// Snapshot of the current record
    pub fn get(&self) -> Settings {
        self.current.read().clone()
    }

    /// Mutate the record and rewrite it in full.
    ///
    /// The in-memory record keeps the mutation even if the write fails.
    pub fn update<F>(&self, mutate: F) -> Result<Settings, SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        let snapshot = {
            let mut current = self.current.write();
            mutate(&mut current);
            current.clone()
        };
        self.persist(&snapshot)?;
        Ok(snapshot)
    }

    /// Replace the whole record and rewrite it.
    pub fn replace(&self, settings: Settings) -> Result<(), SettingsError> {
        *self.current.write() = settings.clone();
        self.persist(&settings)
    }

    pub fn storage(&self) -> &B {
        &self.storage
    }

    fn persist(&self, settings: &Settings) -> Result<(), SettingsError> {
        let contents = serde_json::to_string(settings)?;
        self.storage.write(&self.key, &contents)
    }
}

fn load<B: SettingsStorage>(storage: &B, key: &str) -> Settings {
    let contents = match storage.read(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            tracing::debug!(key, "no stored settings, using defaults");
            return Settings::default();
        }
        Err(error) => {
            tracing::warn!(key, %error, "failed to read settings, using defaults");
            return Settings::default();
        }
    };

    serde_json::from_str(&contents).unwrap_or_else(|error| {
        tracing::warn!(key, %error, "stored settings are malformed, using defaults");
        Settings::default()
    })
}
