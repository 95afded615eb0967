//! `stitch` and `blend`.

use crate::cli::RunArgs;
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use colored::Colorize;
use pano_core::config::SettingsRepository;
use pano_core::engine::{ExecutorOptions, ExitCodePolicy, PipelineExecutor};
use pano_core::inputs::{default_output_layout, filter_supported_images};
use pano_core::runner::cancel_pair;
use pano_core::state::RunState;
use pano_protocol::progress_models::ProgressEvent;
use pano_protocol::run_models::{PipelineKind, RunReport, RunStatus};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Where the output goes and where the tools run.
#[derive(Debug, PartialEq, Eq)]
pub struct OutputPlan {
    pub output: PathBuf,
    pub working_dir: Option<PathBuf>,
    /// Folder to create before the run starts.
    pub create_dir: Option<PathBuf>,
}

/// Work out the output path and working directory for a run.
///
/// An explicit output keeps the working directory the user gave (if any).
/// Otherwise the default `<stem>-pano` folder next to the first input holds
/// the output and doubles as the working directory.
pub fn plan_output(inputs: &[PathBuf], args: &RunArgs) -> OutputPlan {
    match &args.output {
        Some(output) => OutputPlan {
            output: output.clone(),
            working_dir: args.work_dir.clone(),
            create_dir: None,
        },
        None => {
            let (folder, file) = default_output_layout(&inputs[0]);
            OutputPlan {
                output: file,
                working_dir: Some(args.work_dir.clone().unwrap_or_else(|| folder.clone())),
                create_dir: Some(folder),
            }
        }
    }
}

pub async fn run(
    kind: PipelineKind,
    args: RunArgs,
    crop: bool,
    settings: &SettingsRepository,
) -> Result<()> {
    let inputs = filter_supported_images(&args.inputs)
        .into_iter()
        .map(|p| std::path::absolute(&p).wrap_err_with(|| format!("resolving {}", p.display())))
        .collect::<Result<Vec<_>>>()?;
    if inputs.is_empty() {
        bail!("none of the inputs is a JPEG or TIFF image");
    }
    let skipped = args.inputs.len() - inputs.len();
    if skipped > 0 {
        warn!(skipped, "ignoring inputs that are not JPEG or TIFF images");
    }

    let plan = plan_output(&inputs, &args);
    let output = std::path::absolute(&plan.output)
        .wrap_err_with(|| format!("resolving {}", plan.output.display()))?;

    let tool_directory = match &args.tool_dir {
        Some(dir) => Some(dir.clone()),
        None => settings.load()?.tool_directory,
    };

    let mut builder = RunState::builder(&output, inputs).crop(crop);
    if let Some(dir) = tool_directory {
        builder = builder.tool_directory(dir);
    }
    if let Some(dir) = plan.working_dir {
        builder = builder.working_directory(dir);
    }
    if let Some(dir) = &args.log_dir {
        builder = builder.log_directory(dir);
    }
    let state = builder.build()?;

    let (cancel_handle, cancel_signal) = cancel_pair();
    let options = ExecutorOptions {
        exit_code_policy: if args.strict_exit_codes {
            ExitCodePolicy::Strict
        } else {
            ExitCodePolicy::Ignore
        },
        step_timeout: args.step_timeout.map(Duration::from_secs),
        cancel: Some(cancel_signal),
    };

    let json = args.json;
    let reporter = move |event: &ProgressEvent| {
        let line = event.to_string().cyan();
        if json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    let mut executor = PipelineExecutor::for_kind(kind, state)
        .with_reporter(Arc::new(reporter))
        .with_options(options);

    if args.dry_run {
        for line in executor.plan() {
            println!("{line}");
        }
        return Ok(());
    }

    if let Some(dir) = &plan.create_dir {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating output folder {}", dir.display()))?;
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received; cancelling run");
            cancel_handle.cancel();
        }
    });

    let outcome = executor.execute().await;
    let report = executor.report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    outcome.map_err(Into::into)
}

fn print_summary(report: &RunReport) {
    match report.status {
        RunStatus::Completed => {
            if let Some(output) = &report.output {
                println!("{} {}", "Created".green().bold(), output.display());
            }
        }
        RunStatus::Cancelled => {
            println!(
                "{} after {} of {} steps",
                "Cancelled".yellow().bold(),
                report.steps_completed,
                report.total_steps
            );
        }
        _ => {
            println!(
                "{} after {} of {} steps",
                "Failed".red().bold(),
                report.steps_completed,
                report.total_steps
            );
        }
    }

    if let Some(log) = &report.log_file {
        println!("Log written to {}", log.display());
    }
}
