//! Declarative step tables.
//!
//! A step table is the ordered list of tool invocations making up one
//! pipeline variant. Steps only describe work: argument builders are plain
//! functions of the [`RunState`] and never touch the filesystem. The executor
//! is what runs them.
//!
//! - [`panorama`]: nine-step panorama stitch
//! - [`blend`]: three-step exposure blend

pub mod blend;
pub mod panorama;

use crate::state::RunState;
use pano_protocol::run_models::PipelineKind;
use std::fmt;
use std::path::PathBuf;

/// What a step does when it runs.
#[derive(Clone, Copy)]
pub enum StepAction {
    /// Launch an external tool.
    Tool {
        /// Tool name without platform suffix (e.g. `cpfind`).
        executable: &'static str,
        arguments: fn(&RunState) -> String,
    },

    /// Move a file produced by an earlier step to the output path.
    Relocate { source: fn(&RunState) -> PathBuf },
}

impl fmt::Debug for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Tool { executable, .. } => {
                f.debug_struct("Tool").field("executable", executable).finish()
            }
            StepAction::Relocate { .. } => f.debug_struct("Relocate").finish(),
        }
    }
}

/// One entry in a [`StepTable`].
#[derive(Debug, Clone, Copy)]
pub struct PipelineStep {
    /// 1-based position in the table.
    pub index: usize,
    /// Length of the owning table.
    pub total: usize,
    /// Human-readable message sent with the progress event.
    pub description: &'static str,
    pub action: StepAction,
}

impl PipelineStep {
    pub fn executable(&self) -> Option<&'static str> {
        match self.action {
            StepAction::Tool { executable, .. } => Some(executable),
            StepAction::Relocate { .. } => None,
        }
    }

    /// Render the argument string for a tool step.
    pub fn arguments(&self, state: &RunState) -> Option<String> {
        match self.action {
            StepAction::Tool { arguments, .. } => Some(arguments(state)),
            StepAction::Relocate { .. } => None,
        }
    }

    /// One-line rendering used in dry runs and traces.
    pub fn describe(&self, state: &RunState) -> String {
        match self.action {
            StepAction::Tool {
                executable,
                arguments,
            } => format!("{executable} {}", arguments(state)),
            StepAction::Relocate { source } => format!(
                "move {} -> {}",
                source(state).display(),
                state.output_path().display()
            ),
        }
    }
}

/// Ordered, immutable list of steps for one pipeline variant.
#[derive(Debug, Clone)]
pub struct StepTable {
    kind: PipelineKind,
    steps: Vec<PipelineStep>,
}

impl StepTable {
    fn new(kind: PipelineKind, entries: &[(&'static str, StepAction)]) -> Self {
        let total = entries.len();
        let steps = entries
            .iter()
            .enumerate()
            .map(|(i, &(description, action))| PipelineStep {
                index: i + 1,
                total,
                description,
                action,
            })
            .collect();

        Self { kind, steps }
    }

    /// The table for a pipeline kind.
    pub fn for_kind(kind: PipelineKind) -> Self {
        match kind {
            PipelineKind::Panorama => panorama::table(),
            PipelineKind::BlendedStack => blend::table(),
        }
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Argument strings of every tool step, in order.
    pub fn resolved_arguments(&self, state: &RunState) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|step| step.arguments(state))
            .collect()
    }
}
