//! # pano-core
//!
//! Pipeline orchestration for the Hugin command-line tool chain.
//!
//! This crate provides:
//! - Declarative step tables for panorama stitching and exposure blending
//! - A pipeline executor that runs a table step by step, fail-fast
//! - A process runner that captures tool output and supports timeouts and
//!   cancellation
//! - A run-scoped diagnostic log, flushed once when the run ends
//! - A JSON settings store for hosts
//!
//! ## Modules
//!
//! - [`config`]: Settings persistence
//! - [`diagnostics`]: Diagnostic log
//! - [`engine`]: Pipeline executor and error types
//! - [`inputs`]: Input filtering and default output layout
//! - [`progress`]: Progress reporter trait
//! - [`runner`]: External process runner and cancellation
//! - [`state`]: Run state
//! - [`steps`]: Step tables

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod inputs;
pub mod progress;
pub mod runner;
pub mod state;
pub mod steps;
