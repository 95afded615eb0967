//! # pano-protocol
//!
//! Shared data models for the PanoCapture pipeline.
//!
//! This crate defines the values that cross the boundary between the
//! pipeline core and whatever hosts it (the bundled CLI, or a plugin shell):
//! - Progress notifications emitted before each pipeline step
//! - Run reports summarising a finished (or failed) pipeline run
//! - The persisted settings document
//!
//! ## Modules
//!
//! - [`config_models`]: Settings document persisted by the host
//! - [`progress_models`]: Per-step progress events
//! - [`run_models`]: Pipeline kinds, run status and run reports
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde, uuid and chrono
//! - Independent compilation: no dependencies on other PanoCapture crates

pub mod config_models;
pub mod progress_models;
pub mod run_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use progress_models::*;
pub use run_models::*;
