//! Progress reporting.
//!
//! The executor calls the reporter synchronously, on the task running the
//! pipeline, right before each step starts.

use pano_protocol::progress_models::ProgressEvent;

/// Sink for per-step progress events.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressReporter for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: &ProgressEvent) {}
}
