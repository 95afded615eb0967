//! Run status and summary models.
//!
//! A run report is produced after the executor returns, whether the run
//! succeeded or not, so that hosts can display or persist the outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Which step table a run uses.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineKind {
    /// Nine-step panorama stitch.
    Panorama,

    /// Three-step exposure blend of a bracketed stack.
    BlendedStack,
}

impl PipelineKind {
    /// Identifier used to name diagnostic log files.
    pub fn component_name(self) -> &'static str {
        match self {
            PipelineKind::Panorama => "PanoramaBuilder",
            PipelineKind::BlendedStack => "BlendedStackBuilder",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::Panorama => f.write_str("panorama"),
            PipelineKind::BlendedStack => f.write_str("blended-stack"),
        }
    }
}

/// Lifecycle status of a pipeline run.
///
/// Pending -> Running -> Completed, or Failed/Cancelled when a step aborts
/// the run. There is no way back from a terminal state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Run has been configured but not started.
    Pending,

    /// Steps are executing.
    Running,

    /// Every step completed and the output file exists.
    Completed,

    /// A step failed; the output path was not produced.
    Failed,

    /// The host cancelled the run.
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled
        )
    }
}

/// Serializable summary of one pipeline run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunReport {
    /// Unique identifier of the run, also written to the tracing spans.
    pub run_id: Uuid,

    pub kind: PipelineKind,

    pub status: RunStatus,

    /// Number of steps that finished successfully.
    pub steps_completed: usize,

    pub total_steps: usize,

    /// The generated file, set only when `status` is `Completed`.
    pub output: Option<PathBuf>,

    /// Where the diagnostic log was written, if a log directory was configured
    /// and the write succeeded.
    pub log_file: Option<PathBuf>,

    /// Display form of the error that aborted the run.
    pub error: Option<String>,

    pub started_at: Option<DateTime<Utc>>,

    pub finished_at: Option<DateTime<Utc>>,
}
