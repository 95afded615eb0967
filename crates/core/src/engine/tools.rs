//! Filesystem helpers used by the executor: locating tool executables and
//! moving finished files into place.

use crate::engine::error::{PipelineError, PipelineResult};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the executable for `name`.
///
/// With a tool directory the file must be `<dir>/<name><EXE_SUFFIX>`;
/// otherwise the name is looked up on `PATH`.
pub fn resolve_executable(name: &str, tool_directory: Option<&Path>) -> PipelineResult<PathBuf> {
    let Some(dir) = tool_directory else {
        return which::which(name).map_err(|e| PipelineError::ExecutableNotFound {
            name: name.to_string(),
            reason: e.to_string(),
        });
    };

    if !dir.is_dir() {
        return Err(PipelineError::ToolDirectoryMissing(dir.to_path_buf()));
    }

    let path = dir.join(format!("{name}{}", std::env::consts::EXE_SUFFIX));
    if path.is_file() {
        Ok(path)
    } else {
        Err(PipelineError::ExecutableNotFound {
            name: path.display().to_string(),
            reason: format!("no such file in {}", dir.display()),
        })
    }
}

/// Move `from` to `to` without replacing an existing file.
///
/// Falls back to copy-then-remove when a plain rename is not possible, e.g.
/// across filesystems.
pub fn relocate(from: &Path, to: &Path) -> PipelineResult<()> {
    let context = || format!("moving {} to {}", from.display(), to.display());

    if to.exists() {
        return Err(PipelineError::io(
            context(),
            io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
        ));
    }

    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(context(), e))?;
    }

    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) if from.is_file() => {
            debug!(error = %rename_err, "rename failed; copying instead");
            std::fs::copy(from, to).map_err(|e| PipelineError::io(context(), e))?;
            std::fs::remove_file(from).map_err(|e| PipelineError::io(context(), e))
        }
        Err(e) => Err(PipelineError::io(context(), e)),
    }
}
