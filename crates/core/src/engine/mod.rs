//! Pipeline execution engine.
//!
//! The [`PipelineExecutor`] walks a step table in order. For each step it
//! reports progress, resolves the tool, hands the invocation to the process
//! runner and applies the exit-code policy. The first failure ends the run
//! and is written to the diagnostic log before being returned.

pub mod error;
pub mod executor;
pub mod options;
pub mod tools;

pub use error::{ErrorKind, PipelineError, PipelineResult};
pub use executor::PipelineExecutor;
pub use options::{ExecutorOptions, ExitCodePolicy};
