//! Key/value backends for the settings record.

use super::error::SettingsError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where the settings document lives.
///
/// A backend stores whole documents under a key. There is no partial write
/// and no locking beyond what the backend itself does.
pub trait SettingsStorage: Send + Sync {
    /// Read the document stored under `key`, or `None` if there is none.
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Replace the document stored under `key`.
    fn write(&self, key: &str, contents: &str) -> Result<(), SettingsError>;
}

/// One `<key>.json` file per document inside a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform configuration directory.
    pub fn default_location() -> Result<Self, SettingsError> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join("palaxy")))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), SettingsError> {
        let path = self.path_for(key);
        std::fs::create_dir_all(&self.dir).map_err(|source| SettingsError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, contents).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "settings written");
        Ok(())
    }
}

/// In-memory backend, for tests and hosts without a writable disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a document.
    pub fn with(self, key: impl Into<String>, contents: impl Into<String>) -> Self {
        self.documents.lock().insert(key.into(), contents.into());
        self
    }

    /// Number of writes performed so far.
    pub fn writes(&self) -> usize {
        *self.writes.lock()
    }
}

impl SettingsStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.documents.lock().get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), SettingsError> {
        self.documents
            .lock()
            .insert(key.to_string(), contents.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }
}
