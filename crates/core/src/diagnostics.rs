//! Run-scoped diagnostic log.
//!
//! Collects everything the external tools print during one run, plus a
//! failure block if the run aborts, and writes it to disk once when the run
//! ends. Writing the log is best-effort: a failed write is reported through
//! `tracing` and otherwise ignored so it can never replace the error that
//! ended the run.

use chrono::Utc;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Marker line that opens a failure block.
pub const FAILURE_MARKER: &str = "EXCEPTION THROWN!";

/// Append-only text accumulator owned by a single run.
#[derive(Debug)]
pub struct DiagnosticLog {
    component: String,
    content: String,
    flushed: bool,
    flushed_to: Option<PathBuf>,
}

impl DiagnosticLog {
    /// Create an empty log.
    ///
    /// `component` names the log file (`<component>log.<timestamp>.txt`).
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            content: String::new(),
            flushed: false,
            flushed_to: None,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Append raw text.
    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Append text followed by a newline.
    pub fn append_line(&mut self, text: &str) {
        self.content.push_str(text);
        self.content.push('\n');
    }

    /// Append the failure block: marker, message, then one line per trace entry.
    pub fn append_failure(&mut self, message: &str, trace: &[String]) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
        self.append_line(FAILURE_MARKER);
        self.append_line(message);
        for entry in trace {
            let _ = writeln!(self.content, "   at {entry}");
        }
    }

    /// Everything appended so far.
    pub fn contents(&self) -> &str {
        &self.content
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Path written by the successful flush, if any.
    pub fn flushed_to(&self) -> Option<&Path> {
        self.flushed_to.as_deref()
    }

    /// Write the whole log into `directory`, creating it if needed.
    ///
    /// Only the first call does anything; later calls return `None`. A write
    /// failure is logged and swallowed, and still counts as the one flush.
    pub fn flush(&mut self, directory: &Path) -> Option<PathBuf> {
        if self.flushed {
            debug!(component = %self.component, "diagnostic log already flushed");
            return None;
        }
        self.flushed = true;

        match self.write_to(directory) {
            Ok(path) => {
                debug!(path = %path.display(), "diagnostic log written");
                self.flushed_to = Some(path.clone());
                Some(path)
            }
            Err(e) => {
                warn!(
                    directory = %directory.display(),
                    error = %e,
                    "failed to write diagnostic log"
                );
                None
            }
        }
    }

    fn write_to(&self, directory: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(directory)?;
        let path = directory.join(self.file_name());
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }

    fn file_name(&self) -> String {
        let stamp = Utc::now().format("%Y%m%d%H%M%S%f");
        format!("{}log.{stamp}.txt", self.component)
    }
}
