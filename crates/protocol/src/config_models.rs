//! Settings document persisted by the host.
//!
//! The pipeline core never reads or writes this document itself; hosts load
//! it and inject the values into a run.

use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// Default location of the Hugin `bin` folder on Windows installs.
pub const WINDOWS_DEFAULT_TOOL_DIRECTORY: &str = r"C:\Program Files\Hugin\bin";

/// Represents the settings JSON document.
///
/// # Example
///
/// ```json
/// { "tool_directory": "C:\\Program Files\\Hugin\\bin" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Folder containing the Hugin command-line tools.
    ///
    /// When unset, tools are resolved from `PATH`.
    #[serde(default)]
    pub tool_directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let tool_directory = if cfg!(windows) {
            Some(PathBuf::from(WINDOWS_DEFAULT_TOOL_DIRECTORY))
        } else {
            None
        };

        Self { tool_directory }
    }
}
