//! Nine-step panorama stitch.
//!
//! Every step rewrites the project file next to the output, so the table is
//! strictly ordered. `pano_modify` is the only step that looks at the crop
//! flag.

use super::{StepAction, StepTable};
use crate::runner::args::{quote, quote_all};
use crate::state::RunState;
use pano_protocol::run_models::PipelineKind;

pub fn table() -> StepTable {
    StepTable::new(
        PipelineKind::Panorama,
        &[
            (
                "Creating Hugin project",
                StepAction::Tool {
                    executable: "pto_gen",
                    arguments: create_project,
                },
            ),
            (
                "Finding points",
                StepAction::Tool {
                    executable: "cpfind",
                    arguments: find_points,
                },
            ),
            (
                "Cleaning points",
                StepAction::Tool {
                    executable: "cpclean",
                    arguments: rewrite_project,
                },
            ),
            (
                "Finding lines",
                StepAction::Tool {
                    executable: "linefind",
                    arguments: rewrite_project,
                },
            ),
            (
                "Optimising",
                StepAction::Tool {
                    executable: "autooptimiser",
                    arguments: optimise,
                },
            ),
            (
                "Modifying",
                StepAction::Tool {
                    executable: "pano_modify",
                    arguments: modify_canvas,
                },
            ),
            (
                "Executing",
                StepAction::Tool {
                    executable: "hugin_executor",
                    arguments: execute_stitch,
                },
            ),
            (
                "Generating files",
                StepAction::Tool {
                    executable: "nona",
                    arguments: render_images,
                },
            ),
            (
                "Blending",
                StepAction::Tool {
                    executable: "enblend",
                    arguments: blend_images,
                },
            ),
        ],
    )
}

fn project(state: &RunState) -> String {
    quote(state.project_file_path())
}

fn create_project(state: &RunState) -> String {
    format!("-o {} {}", project(state), quote_all(state.input_files()))
}

fn find_points(state: &RunState) -> String {
    let p = project(state);
    format!("-o {p} --multirow --celeste {p}")
}

fn rewrite_project(state: &RunState) -> String {
    let p = project(state);
    format!("-o {p} {p}")
}

fn optimise(state: &RunState) -> String {
    let p = project(state);
    format!("-a -m -l -s -o {p} {p}")
}

fn modify_canvas(state: &RunState) -> String {
    let p = project(state);
    if state.crop_enabled() {
        format!("--canvas=AUTO --crop=AUTO -o {p} {p}")
    } else {
        format!("--canvas=AUTO -o {p} {p}")
    }
}

fn execute_stitch(state: &RunState) -> String {
    format!(
        "--stitching --prefix=\"{}\" {}",
        state.output_stem(),
        project(state)
    )
}

fn render_images(state: &RunState) -> String {
    format!("-m TIFF_m -o project {}", project(state))
}

fn blend_images(state: &RunState) -> String {
    format!("-o {} *.tif", quote(state.output_path()))
}
