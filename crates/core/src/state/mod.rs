//! Per-run state.
//!
//! This module provides:
//! - `RunState`, the validated inputs and outputs of one pipeline run
//! - `RunStateBuilder`, the only way to construct one

pub mod run;

pub use run::{project_file_for, RunState, RunStateBuilder, PROJECT_FILE_SUFFIX};
