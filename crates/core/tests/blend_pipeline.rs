//! End-to-end exposure blend against shell-script tools.

#![cfg(unix)]

mod common;

use common::*;
use pano_core::diagnostics::FAILURE_MARKER;
use pano_core::engine::{ErrorKind, PipelineError, PipelineExecutor};
use pano_core::state::RunState;
use pano_protocol::run_models::{PipelineKind, RunStatus};

struct Scene {
    root: tempfile::TempDir,
    tools: std::path::PathBuf,
    inputs: Vec<std::path::PathBuf>,
}

fn scene() -> Scene {
    let root = tempfile::tempdir().unwrap();
    let tools = root.path().join("bin");
    std::fs::create_dir_all(&tools).unwrap();
    install_blend_tools(&tools);
    let inputs = create_inputs(root.path(), &["dark.tif", "mid.tif", "bright.tif"]);
    Scene {
        root,
        tools,
        inputs,
    }
}

#[tokio::test]
async fn test_blend_scenario() {
    let s = scene();
    let out_dir = s.root.path().join("stack-pano");
    std::fs::create_dir_all(&out_dir).unwrap();
    let output = out_dir.join("stack-pano.tif");

    let state = RunState::builder(&output, s.inputs.clone())
        .tool_directory(&s.tools)
        .working_directory(&out_dir)
        .log_directory(s.root.path().join("logs"))
        .build()
        .unwrap();
    let progress = ProgressCollector::new();

    let mut executor = PipelineExecutor::for_kind(PipelineKind::BlendedStack, state)
        .with_reporter(progress.clone());
    executor.execute().await.unwrap();

    assert_eq!(
        progress.tuples(),
        vec![
            (1, 3, "Align Images".to_string()),
            (2, 3, "Enfuse Images".to_string()),
            (3, 3, "Renaming".to_string()),
        ]
    );
    assert_eq!(executor.result(), Some(output.as_path()));
    assert_eq!(std::fs::read_to_string(&output).unwrap().trim(), "fused");
    assert!(!out_dir.join("a.tif").exists());
    assert!(out_dir.join("tempstacked0000.tif").exists());
    assert!(out_dir.join("tempstacked0001.tif").exists());

    let log = executor.log().contents();
    assert!(log.contains("align_image_stack -v -m -a"));
    assert!(log.contains("enfuse -v --exposure-weight=0"));
    // enfuse received the expanded stack, not the literal pattern.
    assert!(log.contains("tempstacked0000.tif"));
    assert!(!log.contains("tempstacked*.tif"));
}

#[tokio::test]
async fn test_destination_conflict_fails_renaming_step() {
    let s = scene();
    let work = s.root.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    let output = work.join("taken.tif");
    std::fs::write(&output, "already here").unwrap();
    let logs = s.root.path().join("logs");

    let state = RunState::builder(&output, s.inputs.clone())
        .tool_directory(&s.tools)
        .working_directory(&work)
        .log_directory(&logs)
        .build()
        .unwrap();
    let progress = ProgressCollector::new();

    let mut executor = PipelineExecutor::for_kind(PipelineKind::BlendedStack, state)
        .with_reporter(progress.clone());
    let err = executor.execute().await.unwrap_err();

    assert!(matches!(err, PipelineError::Io { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(progress.events().len(), 3);
    assert!(executor.result().is_none());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "already here");
    assert!(work.join("a.tif").exists());

    let report = executor.report();
    assert_eq!(report.status, RunStatus::Failed);
    assert_eq!(report.steps_completed, 2);

    let written = list_files(&logs);
    assert_eq!(written.len(), 1);
    let content = std::fs::read_to_string(&written[0]).unwrap();
    assert!(content.starts_with("align_image_stack"));
    assert!(content.contains(FAILURE_MARKER));
    assert!(content.contains(&err.to_string()));
    assert!(content.contains("   at step 3 of 3 (Renaming)"));
    assert!(content.contains("   at destination already exists"));
}
