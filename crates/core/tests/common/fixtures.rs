//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use pano_core::progress::ProgressReporter;
use pano_protocol::progress_models::ProgressEvent;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Tool names of the stitching table, in order.
pub const PANORAMA_TOOLS: [&str; 9] = [
    "pto_gen",
    "cpfind",
    "cpclean",
    "linefind",
    "autooptimiser",
    "pano_modify",
    "hugin_executor",
    "nona",
    "enblend",
];

/// Tool names of the blend table.
pub const BLEND_TOOLS: [&str; 2] = ["align_image_stack", "enfuse"];

/// Progress reporter that keeps every event.
#[derive(Default)]
pub struct ProgressCollector {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressCollector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events as `(step, total, message)` tuples for compact assertions.
    pub fn tuples(&self) -> Vec<(usize, usize, String)> {
        self.events()
            .into_iter()
            .map(|e| (e.step, e.total, e.message))
            .collect()
    }
}

impl ProgressReporter for ProgressCollector {
    fn report(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Create placeholder input images named `names` inside `dir`.
pub fn create_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, "image").unwrap();
            path
        })
        .collect()
}

/// Create empty files standing in for executables; enough for resolution
/// when the runner is faked.
pub fn create_placeholder_tools(dir: &Path, names: &[&str]) {
    for name in names {
        let file = dir.join(format!("{name}{}", std::env::consts::EXE_SUFFIX));
        std::fs::write(file, "").unwrap();
    }
}

/// Files directly inside `dir`.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect(),
        Err(_) => Vec::new(),
    }
}
