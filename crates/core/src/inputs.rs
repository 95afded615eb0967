//! Input selection helpers for hosts.

use std::path::{Path, PathBuf};

/// Extensions the tool chain reads, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "tif", "tiff"];

/// Suffix of the folder and file created for a run's output.
pub const OUTPUT_SUFFIX: &str = "-pano";

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Keep the supported images, preserving order.
pub fn filter_supported_images<I, P>(candidates: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    candidates
        .into_iter()
        .map(Into::into)
        .filter(|path| is_supported_image(path))
        .collect()
}

/// Default output location for a run started from `first_input`.
///
/// `/shots/IMG_1.jpg` gives the folder `/shots/IMG_1-pano` and the file
/// `/shots/IMG_1-pano/IMG_1-pano.tif`.
pub fn default_output_layout(first_input: &Path) -> (PathBuf, PathBuf) {
    let stem = first_input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = format!("{stem}{OUTPUT_SUFFIX}");

    let folder = match first_input.parent() {
        Some(parent) => parent.join(&name),
        None => PathBuf::from(&name),
    };
    let file = folder.join(format!("{name}.tif"));

    (folder, file)
}
