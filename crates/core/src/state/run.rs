//! Run state.
//!
//! A `RunState` captures everything a step table needs to render argument
//! strings: the output path and the project file derived from it, the input
//! images, and the optional directories. It is built once through
//! [`RunStateBuilder`] and only the executor changes it afterwards, to record
//! the generated file.

use crate::engine::error::{PipelineError, PipelineResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the output path to name the project descriptor.
pub const PROJECT_FILE_SUFFIX: &str = ".pto";

/// Derive the project descriptor path for an output path.
///
/// `pano.tif` becomes `pano.tif.pto`.
pub fn project_file_for(output_path: &Path) -> PathBuf {
    let mut name = OsString::from(output_path.as_os_str());
    name.push(PROJECT_FILE_SUFFIX);
    PathBuf::from(name)
}

#[derive(Debug, Clone)]
pub struct RunState {
    output_path: PathBuf,
    project_file_path: PathBuf,
    input_files: Vec<PathBuf>,
    tool_directory: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    log_directory: Option<PathBuf>,
    crop_enabled: bool,
    generated_file: Option<PathBuf>,
}

impl RunState {
    /// Start building a run for `output_path` from `input_files`.
    pub fn builder(
        output_path: impl Into<PathBuf>,
        input_files: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> RunStateBuilder {
        RunStateBuilder {
            output_path: output_path.into(),
            input_files: input_files.into_iter().map(Into::into).collect(),
            tool_directory: None,
            working_directory: None,
            log_directory: None,
            crop_enabled: true,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn project_file_path(&self) -> &Path {
        &self.project_file_path
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn tool_directory(&self) -> Option<&Path> {
        self.tool_directory.as_deref()
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    pub fn log_directory(&self) -> Option<&Path> {
        self.log_directory.as_deref()
    }

    /// Whether the panorama pipeline crops the canvas to content.
    pub fn crop_enabled(&self) -> bool {
        self.crop_enabled
    }

    /// The output file, set only after every step succeeded.
    pub fn generated_file(&self) -> Option<&Path> {
        self.generated_file.as_deref()
    }

    /// Output file name without extension, used as the stitching prefix.
    pub fn output_stem(&self) -> String {
        self.output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the output file (`.` for a bare file name).
    pub fn output_directory(&self) -> PathBuf {
        match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Directory tools run in: the configured one, else the current directory.
    pub fn effective_working_directory(&self) -> PathBuf {
        match &self.working_directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub(crate) fn mark_generated(&mut self) {
        self.generated_file = Some(self.output_path.clone());
    }
}

/// Consuming builder for [`RunState`].
#[derive(Debug, Clone)]
pub struct RunStateBuilder {
    output_path: PathBuf,
    input_files: Vec<PathBuf>,
    tool_directory: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    log_directory: Option<PathBuf>,
    crop_enabled: bool,
}

impl RunStateBuilder {
    /// Folder containing the tool executables. Tools are looked up on `PATH`
    /// when this is not set.
    pub fn tool_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool_directory = Some(dir.into());
        self
    }

    /// Directory the tools run in.
    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Directory that receives the diagnostic log at the end of the run.
    pub fn log_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_directory = Some(dir.into());
        self
    }

    /// Crop the stitched canvas to content (default: on).
    pub fn crop(mut self, enabled: bool) -> Self {
        self.crop_enabled = enabled;
        self
    }

    /// Validate and produce the run state.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::NoInputFiles` when no inputs were given.
    pub fn build(self) -> PipelineResult<RunState> {
        if self.input_files.is_empty() {
            return Err(PipelineError::NoInputFiles);
        }

        Ok(RunState {
            project_file_path: project_file_for(&self.output_path),
            output_path: self.output_path,
            input_files: self.input_files,
            tool_directory: self.tool_directory,
            working_directory: self.working_directory,
            log_directory: self.log_directory,
            crop_enabled: self.crop_enabled,
            generated_file: None,
        })
    }
}
