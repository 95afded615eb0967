//! Error types for the settings document.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read settings file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`pano_protocol::Settings`].
    #[error("Failed to parse settings file at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to write the settings file.
    #[error("Failed to write settings file at {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
