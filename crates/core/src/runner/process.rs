//! External process runner.
//!
//! Spawns one tool, captures its combined stdout/stderr into the run's
//! diagnostic log, and reports how it exited. Output is drained to end of
//! stream before the exit status is collected, so nothing printed just before
//! the process exits is lost.

use crate::diagnostics::DiagnosticLog;
use crate::engine::error::{PipelineError, PipelineResult};
use crate::runner::args::build_argv;
use crate::runner::cancel::CancelSignal;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio_stream::wrappers::SplitStream;
use tokio_stream::StreamExt;
use tracing::{info, warn};

/// Everything needed to launch one tool for one step.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// 1-based index of the step issuing the invocation.
    pub step: usize,

    /// Tool name as it appears in the step table (e.g. `cpfind`).
    pub tool: String,

    /// Resolved path of the executable.
    pub program: PathBuf,

    /// Argument string; see [`crate::runner::args`] for how it is split.
    pub arguments: String,

    /// Directory to run in. Inherits the current directory when unset.
    pub working_dir: Option<PathBuf>,

    /// Kill the tool if it runs longer than this.
    pub timeout: Option<Duration>,

    pub cancel: Option<CancelSignal>,
}

/// Result of a tool that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    /// Combined stdout/stderr in arrival order.
    pub output: String,
}

/// Runs external tools on behalf of the executor.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation to completion, appending its output to `log`.
    ///
    /// A nonzero exit is not an error at this layer; the executor applies its
    /// exit-code policy to the returned [`ProcessOutput`].
    async fn run(
        &self,
        invocation: &Invocation,
        log: &mut DiagnosticLog,
    ) -> PipelineResult<ProcessOutput>;
}

/// Production runner built on `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        log: &mut DiagnosticLog,
    ) -> PipelineResult<ProcessOutput> {
        let base = match &invocation.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .map_err(|e| PipelineError::io("reading the current directory", e))?,
        };
        let argv = build_argv(&invocation.arguments, &base);

        info!(
            step = invocation.step,
            tool = %invocation.tool,
            program = %invocation.program.display(),
            args = ?argv,
            "starting tool process"
        );

        let mut std_cmd = std::process::Command::new(&invocation.program);
        std_cmd.args(&argv);
        if let Some(dir) = &invocation.working_dir {
            std_cmd.current_dir(dir);
        }
        // Lead a new process group so helpers spawned by the tool can be
        // killed together with it.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            std_cmd.process_group(0);
        }

        let mut cmd = Command::from(std_cmd);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| spawn_error(invocation, e))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            PipelineError::io(
                format!("capturing stdout of {}", invocation.tool),
                std::io::Error::other("stdout was not piped"),
            )
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            PipelineError::io(
                format!("capturing stderr of {}", invocation.tool),
                std::io::Error::other("stderr was not piped"),
            )
        })?;

        let mut output = String::new();
        let mut cancel = invocation.cancel.clone();

        tokio::select! {
            status = drain_and_wait(&mut child, stdout, stderr, log, &mut output, &invocation.tool) => {
                let status = status?;
                let exit_code = status.code();

                info!(
                    step = invocation.step,
                    tool = %invocation.tool,
                    exit_code = ?exit_code,
                    success = status.success(),
                    "tool process exited"
                );

                Ok(ProcessOutput {
                    exit_code,
                    success: status.success(),
                    output,
                })
            }

            _ = deadline(invocation.timeout) => {
                warn!(
                    step = invocation.step,
                    tool = %invocation.tool,
                    "tool exceeded its deadline; killing process group"
                );
                terminate(&mut child).await;
                Err(PipelineError::StepTimedOut {
                    step: invocation.step,
                    tool: invocation.tool.clone(),
                    timeout: invocation.timeout.unwrap_or_default(),
                })
            }

            _ = cancelled(cancel.as_mut()) => {
                info!(
                    step = invocation.step,
                    tool = %invocation.tool,
                    "cancellation requested; killing process group"
                );
                terminate(&mut child).await;
                Err(PipelineError::Cancelled {
                    step: invocation.step,
                })
            }
        }
    }
}

/// Read both pipes to end of stream, then collect the exit status.
async fn drain_and_wait(
    child: &mut Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
    log: &mut DiagnosticLog,
    output: &mut String,
    tool: &str,
) -> PipelineResult<ExitStatus> {
    {
        let out_lines = SplitStream::new(BufReader::new(stdout).split(b'\n'));
        let err_lines = SplitStream::new(BufReader::new(stderr).split(b'\n'));
        let mut merged = out_lines.merge(err_lines);

        while let Some(chunk) = merged.next().await {
            match chunk {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let line = text.trim_end_matches('\r');
                    log.append_line(line);
                    output.push_str(line);
                    output.push('\n');
                }
                Err(e) => {
                    // Dropping the pipes lets a blocked writer fail instead of hanging.
                    warn!(tool = %tool, error = %e, "failed to read tool output");
                    break;
                }
            }
        }
    }

    child
        .wait()
        .await
        .map_err(|e| PipelineError::io(format!("waiting for {tool} to exit"), e))
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(timeout) => tokio::time::sleep(timeout).await,
        None => std::future::pending().await,
    }
}

async fn cancelled(signal: Option<&mut CancelSignal>) {
    match signal {
        Some(signal) => signal.cancelled().await,
        None => std::future::pending().await,
    }
}

/// Kill the tool's process group, then the tool itself.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            let group = format!("-{pid}");
            let result = Command::new("kill")
                .args(["-s", "KILL", "--", group.as_str()])
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            if let Err(e) = result {
                warn!(pid, error = %e, "failed to signal process group");
            }
        }
    }

    if let Err(e) = child.kill().await {
        warn!(error = %e, "failed to kill tool process");
    }
}

fn spawn_error(invocation: &Invocation, e: std::io::Error) -> PipelineError {
    if e.kind() == std::io::ErrorKind::NotFound {
        PipelineError::ExecutableNotFound {
            name: invocation.program.display().to_string(),
            reason: e.to_string(),
        }
    } else {
        PipelineError::io(format!("spawning {}", invocation.tool), e)
    }
}
