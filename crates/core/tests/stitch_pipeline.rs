//! End-to-end panorama stitch against shell-script tools.

#![cfg(unix)]

mod common;

use common::*;
use pano_core::diagnostics::FAILURE_MARKER;
use pano_core::engine::{ExecutorOptions, ExitCodePolicy, PipelineError, PipelineExecutor};
use pano_core::progress::ProgressReporter;
use pano_core::runner::cancel_pair;
use pano_core::state::RunState;
use pano_protocol::progress_models::ProgressEvent;
use pano_protocol::run_models::{PipelineKind, RunStatus};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn setup() -> (tempfile::TempDir, RunState) {
    let root = tempfile::tempdir().unwrap();
    let tools = root.path().join("bin");
    let work = root.path().join("IMG_1-pano");
    std::fs::create_dir_all(&tools).unwrap();
    std::fs::create_dir_all(&work).unwrap();
    install_panorama_tools(&tools);
    let inputs = create_inputs(root.path(), &["IMG_1.jpg", "IMG 2.jpg"]);

    let state = RunState::builder(work.join("IMG_1-pano.tif"), inputs)
        .tool_directory(&tools)
        .working_directory(&work)
        .log_directory(root.path().join("logs"))
        .build()
        .unwrap();
    (root, state)
}

#[tokio::test]
async fn test_stitch_produces_output_and_keeps_project() {
    let (_root, state) = setup();
    let output = state.output_path().to_path_buf();
    let project = state.project_file_path().to_path_buf();
    let work = state.working_directory().unwrap().to_path_buf();
    let progress = ProgressCollector::new();

    let mut executor =
        PipelineExecutor::for_kind(PipelineKind::Panorama, state).with_reporter(progress.clone());
    executor.execute().await.unwrap();

    assert_eq!(executor.result(), Some(output.as_path()));
    assert_eq!(std::fs::read_to_string(&output).unwrap().trim(), "stitched");
    assert!(project.exists());
    assert_eq!(progress.events().len(), 9);

    let enblend_args = std::fs::read_to_string(work.join("enblend-args.txt")).unwrap();
    let args: Vec<&str> = enblend_args.lines().collect();
    assert_eq!(
        args,
        vec![
            "-o",
            output.to_str().unwrap(),
            "project0000.tif",
            "project0001.tif",
        ]
    );

    let log = executor.log().contents();
    assert!(log.contains("pto_gen -o"));
    assert!(log.contains("IMG 2.jpg"));
    assert!(log.contains("--prefix=IMG_1-pano"));
}

#[tokio::test]
async fn test_strict_policy_stops_on_failing_tool() {
    let (root, state) = setup();
    write_tool(
        &root.path().join("bin"),
        "cpfind",
        "echo 'no control points found' 1>&2\nexit 1",
    );
    let output = state.output_path().to_path_buf();

    let mut executor = PipelineExecutor::for_kind(PipelineKind::Panorama, state).with_options(
        ExecutorOptions {
            exit_code_policy: ExitCodePolicy::Strict,
            ..Default::default()
        },
    );
    let err = executor.execute().await.unwrap_err();

    assert!(matches!(err, PipelineError::ToolExitStatus { step: 2, code: 1, .. }));
    assert!(!output.exists());
    assert!(executor.log().contents().contains("no control points found"));
    assert!(!executor.log().contents().contains("cpclean"));
}

#[tokio::test]
async fn test_ignore_policy_continues_past_failing_tool() {
    let (root, state) = setup();
    write_tool(&root.path().join("bin"), "linefind", "exit 3");

    let mut executor = PipelineExecutor::for_kind(PipelineKind::Panorama, state);
    executor.execute().await.unwrap();

    assert!(executor.result().is_some());
    assert!(executor.log().contents().contains("enblend"));
}

#[tokio::test]
async fn test_cancel_while_step_two_runs() {
    let (root, state) = setup();
    write_tool(&root.path().join("bin"), "cpfind", "echo searching\nsleep 30");
    let progress = ProgressCollector::new();
    let (handle, signal) = cancel_pair();

    let events = progress.clone();
    let reporter = move |event: &ProgressEvent| {
        events.report(event);
        if event.step == 2 {
            let handle = handle.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                handle.cancel();
            });
        }
    };

    let mut executor = PipelineExecutor::for_kind(PipelineKind::Panorama, state)
        .with_reporter(Arc::new(reporter))
        .with_options(ExecutorOptions {
            cancel: Some(signal),
            ..Default::default()
        });
    let start = Instant::now();
    let err = executor.execute().await.unwrap_err();

    assert!(matches!(err, PipelineError::Cancelled { step: 2 }));
    assert!(start.elapsed() < Duration::from_secs(10));
    assert_eq!(progress.events().len(), 2);
    assert!(executor.result().is_none());

    let report = executor.report();
    assert_eq!(report.status, RunStatus::Cancelled);
    assert_eq!(report.steps_completed, 1);

    let logs = list_files(&root.path().join("logs"));
    assert_eq!(logs.len(), 1);
    let content = std::fs::read_to_string(&logs[0]).unwrap();
    assert!(content.contains(FAILURE_MARKER));
    assert!(!content.contains("cpclean"));
}
