//! Three-step exposure blend.
//!
//! `align_image_stack` writes `tempstacked0000.tif`, `tempstacked0001.tif`,
//! ... next to the output, `enfuse` fuses them into `a.tif` in the directory
//! it runs in, and the last step moves that file to the requested output.

use super::{StepAction, StepTable};
use crate::runner::args::{quote, quote_all};
use crate::state::RunState;
use pano_protocol::run_models::PipelineKind;
use std::path::PathBuf;

/// Name `enfuse` gives its result when no output option is passed.
pub const FUSED_OUTPUT_NAME: &str = "a.tif";

/// Base name for the aligned intermediates.
pub const STACK_PREFIX: &str = "tempstacked";

pub fn table() -> StepTable {
    StepTable::new(
        PipelineKind::BlendedStack,
        &[
            (
                "Align Images",
                StepAction::Tool {
                    executable: "align_image_stack",
                    arguments: align,
                },
            ),
            (
                "Enfuse Images",
                StepAction::Tool {
                    executable: "enfuse",
                    arguments: fuse,
                },
            ),
            (
                "Renaming",
                StepAction::Relocate {
                    source: fused_output,
                },
            ),
        ],
    )
}

/// `<output dir>/tempstacked`, the prefix handed to the aligner.
pub fn stack_prefix(state: &RunState) -> PathBuf {
    state.output_directory().join(STACK_PREFIX)
}

/// Where `enfuse` leaves its result.
pub fn fused_output(state: &RunState) -> PathBuf {
    state.effective_working_directory().join(FUSED_OUTPUT_NAME)
}

fn align(state: &RunState) -> String {
    format!(
        "-v -m -a {} {}",
        quote(&stack_prefix(state)),
        quote_all(state.input_files())
    )
}

fn fuse(state: &RunState) -> String {
    format!(
        "-v --exposure-weight=0 --saturation-weight=0 --contrast-weight=1 \
         --contrast-edge-scale=0.3 --hard-mask {}*.tif",
        quote(&stack_prefix(state))
    )
}
