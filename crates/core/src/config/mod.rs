//! Settings persistence for hosts.
//!
//! This module provides the JSON settings store the CLI uses to remember the
//! tool directory between runs.

pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::{SettingsRepository, SETTINGS_FILE_NAME};
