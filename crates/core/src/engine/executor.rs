use crate::diagnostics::DiagnosticLog;
use crate::engine::error::{ErrorKind, PipelineError, PipelineResult};
use crate::engine::options::ExecutorOptions;
use crate::engine::tools::{relocate, resolve_executable};
use crate::progress::{NoopReporter, ProgressReporter};
use crate::runner::{Invocation, ProcessRunner, TokioProcessRunner};
use crate::state::RunState;
use crate::steps::{PipelineStep, StepAction, StepTable};
use chrono::{DateTime, Utc};
use pano_protocol::progress_models::ProgressEvent;
use pano_protocol::run_models::{PipelineKind, RunReport, RunStatus};
use std::error::Error as _;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Runs one step table against one run state.
///
/// An executor is single-use: it owns the run's diagnostic log, and once
/// `execute` has returned the run is over whatever the outcome.
pub struct PipelineExecutor {
    run_id: Uuid,
    state: RunState,
    table: StepTable,
    runner: Arc<dyn ProcessRunner>,
    reporter: Arc<dyn ProgressReporter>,
    options: ExecutorOptions,
    log: DiagnosticLog,
    status: RunStatus,
    steps_completed: usize,
    error: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl PipelineExecutor {
    /// Create an executor using the production process runner and no
    /// progress reporting.
    pub fn new(state: RunState, table: StepTable) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            log: DiagnosticLog::new(table.kind().component_name()),
            state,
            table,
            runner: Arc::new(TokioProcessRunner),
            reporter: Arc::new(NoopReporter),
            options: ExecutorOptions::default(),
            status: RunStatus::Pending,
            steps_completed: 0,
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Executor for one of the built-in pipeline variants.
    pub fn for_kind(kind: PipelineKind, state: RunState) -> Self {
        Self::new(state, StepTable::for_kind(kind))
    }

    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    /// Run every step in order.
    ///
    /// The first failing step aborts the run: a failure block is appended to
    /// the diagnostic log, the log is flushed when a log directory is
    /// configured, and the step's error is returned. On success the generated
    /// file is recorded and the log flushed.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::AlreadyExecuted` if called more than once, or
    /// the error of the step that failed.
    pub async fn execute(&mut self) -> PipelineResult<()> {
        if self.status != RunStatus::Pending {
            return Err(PipelineError::AlreadyExecuted);
        }

        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());

        let span = info_span!("pipeline", run_id = %self.run_id, kind = %self.table.kind());
        let outcome = self.run_steps().instrument(span).await;
        self.finished_at = Some(Utc::now());

        if outcome.is_ok() {
            self.state.mark_generated();
            self.status = RunStatus::Completed;
            info!(
                run_id = %self.run_id,
                output = %self.state.output_path().display(),
                "pipeline completed"
            );
        }
        self.flush_log();

        outcome
    }

    async fn run_steps(&mut self) -> PipelineResult<()> {
        let steps: Vec<PipelineStep> = self.table.steps().to_vec();

        for step in &steps {
            if let Err(err) = self.run_step(step).await {
                self.record_failure(step, &err);
                return Err(err);
            }
            self.steps_completed += 1;
        }

        Ok(())
    }

    async fn run_step(&mut self, step: &PipelineStep) -> PipelineResult<()> {
        if self
            .options
            .cancel
            .as_ref()
            .is_some_and(|cancel| cancel.is_cancelled())
        {
            return Err(PipelineError::Cancelled { step: step.index });
        }

        self.reporter.report(&ProgressEvent::new(
            step.index,
            step.total,
            step.description,
        ));
        info!(
            step = step.index,
            total = step.total,
            description = step.description,
            "starting step"
        );

        match step.action {
            StepAction::Tool {
                executable,
                arguments,
            } => {
                let invocation = Invocation {
                    step: step.index,
                    tool: executable.to_string(),
                    program: resolve_executable(executable, self.state.tool_directory())?,
                    arguments: arguments(&self.state),
                    working_dir: self.state.working_directory().map(Path::to_path_buf),
                    timeout: self.options.step_timeout,
                    cancel: self.options.cancel.clone(),
                };

                let output = self.runner.run(&invocation, &mut self.log).await?;
                self.options
                    .exit_code_policy
                    .check(step.index, executable, &output)
            }
            StepAction::Relocate { source } => {
                let from = source(&self.state);
                relocate(&from, self.state.output_path())?;
                self.log.append_line(&format!(
                    "Moved {} to {}",
                    from.display(),
                    self.state.output_path().display()
                ));
                Ok(())
            }
        }
    }

    fn record_failure(&mut self, step: &PipelineStep, err: &PipelineError) {
        let mut trace = vec![format!(
            "step {} of {} ({}): {}",
            step.index,
            step.total,
            step.description,
            step.describe(&self.state)
        )];
        let mut source = err.source();
        while let Some(cause) = source {
            trace.push(cause.to_string());
            source = cause.source();
        }

        self.log.append_failure(&err.to_string(), &trace);
        self.error = Some(err.to_string());
        self.status = match err.kind() {
            ErrorKind::Cancelled => RunStatus::Cancelled,
            _ => RunStatus::Failed,
        };

        error!(
            run_id = %self.run_id,
            step = step.index,
            description = step.description,
            error = %err,
            "pipeline step failed"
        );
    }

    fn flush_log(&mut self) {
        if let Some(dir) = self.state.log_directory() {
            self.log.flush(dir);
        }
    }

    /// The generated file; `None` until every step has succeeded.
    pub fn result(&self) -> Option<&Path> {
        self.state.generated_file()
    }

    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Every step rendered as a command line, without running anything.
    pub fn plan(&self) -> Vec<String> {
        self.table
            .steps()
            .iter()
            .map(|step| step.describe(&self.state))
            .collect()
    }

    /// Summary of the run so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            run_id: self.run_id,
            kind: self.table.kind(),
            status: self.status,
            steps_completed: self.steps_completed,
            total_steps: self.table.len(),
            output: self.result().map(Path::to_path_buf),
            log_file: self.log.flushed_to().map(Path::to_path_buf),
            error: self.error.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }
}
