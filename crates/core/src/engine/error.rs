//! Error types for pipeline execution.
//!
//! Every failure a run can hit is one `PipelineError`. The variants fall into
//! four broad kinds (see [`ErrorKind`]) so hosts can decide how to surface
//! them without matching every variant.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Broad classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Tool directory, executable or inputs are missing or unusable.
    Configuration,
    /// An external tool misbehaved (bad exit, signal, hang).
    ExternalTool,
    /// A filesystem or process I/O operation failed.
    Io,
    /// The host asked the run to stop.
    Cancelled,
}

/// Errors that can occur while building or executing a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A run needs at least one input image.
    #[error("No input files were supplied")]
    NoInputFiles,

    /// The configured tool directory does not exist.
    #[error("Tool directory {0:?} does not exist")]
    ToolDirectoryMissing(PathBuf),

    /// The executable for a step could not be found.
    #[error("Executable '{name}' could not be found: {reason}")]
    ExecutableNotFound { name: String, reason: String },

    /// The tool exited with a nonzero status under the strict exit-code policy.
    #[error("Step {step} ({tool}) exited with status {code}")]
    ToolExitStatus { step: usize, tool: String, code: i32 },

    /// The tool was terminated without an exit code (killed by a signal).
    #[error("Step {step} ({tool}) was terminated without an exit status")]
    ToolTerminated { step: usize, tool: String },

    /// The tool did not finish within the per-step deadline.
    #[error("Step {step} ({tool}) did not finish within {timeout:?}")]
    StepTimedOut {
        step: usize,
        tool: String,
        timeout: Duration,
    },

    /// The host cancelled the run.
    #[error("Run was cancelled at step {step}")]
    Cancelled { step: usize },

    /// An executor was asked to run twice.
    #[error("This pipeline run has already been executed")]
    AlreadyExecuted,

    /// Filesystem or process I/O failed.
    #[error("I/O failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::NoInputFiles
            | PipelineError::ToolDirectoryMissing(_)
            | PipelineError::ExecutableNotFound { .. }
            | PipelineError::AlreadyExecuted => ErrorKind::Configuration,
            PipelineError::ToolExitStatus { .. }
            | PipelineError::ToolTerminated { .. }
            | PipelineError::StepTimedOut { .. } => ErrorKind::ExternalTool,
            PipelineError::Cancelled { .. } => ErrorKind::Cancelled,
            PipelineError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Type alias for Result with PipelineError.
pub type PipelineResult<T> = Result<T, PipelineError>;
