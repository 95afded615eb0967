//! Executor options.

use crate::engine::error::{PipelineError, PipelineResult};
use crate::runner::{CancelSignal, ProcessOutput};
use std::time::Duration;
use tracing::warn;

/// What to do when a tool exits with a nonzero status.
///
/// The tool chain is known to return nonzero codes for runs that still
/// produced usable output, so the default is to log and carry on. A tool
/// killed by a signal fails the step under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitCodePolicy {
    #[default]
    Ignore,
    Strict,
}

impl ExitCodePolicy {
    /// Decide whether a finished tool failed its step.
    pub fn check(self, step: usize, tool: &str, output: &ProcessOutput) -> PipelineResult<()> {
        if output.success {
            return Ok(());
        }

        match (self, output.exit_code) {
            (_, None) => Err(PipelineError::ToolTerminated {
                step,
                tool: tool.to_string(),
            }),
            (ExitCodePolicy::Strict, Some(code)) => Err(PipelineError::ToolExitStatus {
                step,
                tool: tool.to_string(),
                code,
            }),
            (ExitCodePolicy::Ignore, Some(code)) => {
                warn!(step, tool, code, "tool exited with nonzero status; continuing");
                Ok(())
            }
        }
    }
}

/// Run-wide knobs that are not part of the run state.
#[derive(Debug, Clone, Default)]
pub struct ExecutorOptions {
    pub exit_code_policy: ExitCodePolicy,

    /// Deadline applied to each tool invocation separately.
    pub step_timeout: Option<Duration>,

    pub cancel: Option<CancelSignal>,
}
