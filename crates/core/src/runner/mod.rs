//! Running external tools.
//!
//! - [`process`]: the `ProcessRunner` seam and its tokio implementation
//! - [`args`]: argument-string tokenizing, quoting and wildcard expansion
//! - [`cancel`]: host-triggered cancellation

pub mod args;
pub mod cancel;
pub mod process;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use process::{Invocation, ProcessOutput, ProcessRunner, TokioProcessRunner};
