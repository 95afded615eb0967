//! Common test utilities for pipeline integration tests.
//!
//! This module provides shared functionality across the integration tests:
//! - Run state fixtures and a progress collector
//! - A recording process runner that never spawns anything
//! - Fake tool scripts for end-to-end runs on unix

pub mod fake_runner;
pub mod fake_tools;
pub mod fixtures;

#[allow(unused_imports)]
pub use fake_runner::*;
#[allow(unused_imports)]
pub use fake_tools::*;
#[allow(unused_imports)]
pub use fixtures::*;
