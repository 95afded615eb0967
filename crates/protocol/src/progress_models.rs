//! Progress notifications.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emitted once before each pipeline step starts.
///
/// `step` is 1-based and `total` is the length of the step table, so a
/// complete run of an N-step pipeline produces `(1, N) .. (N, N)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub step: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(step: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            step,
            total,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {} - {}", self.step, self.total, self.message)
    }
}
