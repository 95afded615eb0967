//! JSON-backed settings store.
//!
//! Hosts own the store; the executor only ever sees the values copied out of
//! it into a [`crate::state::RunState`].

use crate::config::error::{ConfigError, ConfigResult};
use pano_protocol::config_models::Settings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name used when the host does not pick one.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Reads and writes the settings document at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings, falling back to the platform defaults when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> ConfigResult<Settings> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file; using defaults");
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::JsonParse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Write the settings as pretty-printed JSON, creating parent directories.
    pub fn save(&self, settings: &Settings) -> ConfigResult<()> {
        let write_error = |e: std::io::Error| ConfigError::FileWrite {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|e| ConfigError::JsonParse {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(write_error)?;

        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let repo = SettingsRepository::new(dir.path().join(SETTINGS_FILE_NAME));
        assert_eq!(repo.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let repo = SettingsRepository::new(dir.path().join("nested/dir/settings.json"));
        let settings = Settings {
            tool_directory: Some(PathBuf::from("/opt/hugin/bin")),
        };

        repo.save(&settings).unwrap();

        assert_eq!(repo.load().unwrap(), settings);
        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"tool_directory\": \"/opt/hugin/bin\""));
    }

    #[test]
    fn test_unknown_fields_and_missing_tool_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let settings = SettingsRepository::new(&path).load().unwrap();
        assert!(settings.tool_directory.is_none());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SettingsRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse { .. }));
    }
}
