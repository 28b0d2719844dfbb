//! Settings persistence errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the settings record
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}
