//! Process runner fake for deterministic executor tests.

#![allow(dead_code)]

use async_trait::async_trait;
use pano_core::diagnostics::DiagnosticLog;
use pano_core::engine::PipelineResult;
use pano_core::runner::{Invocation, ProcessOutput, ProcessRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every invocation and answers with a configurable exit code.
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    exit_codes: HashMap<&'static str, i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `tool` exit with `code`.
    pub fn exit_with(mut self, tool: &'static str, code: i32) -> Self {
        self.exit_codes.insert(tool, code);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn tools(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.tool).collect()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        log: &mut DiagnosticLog,
    ) -> PipelineResult<ProcessOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());

        let code = self
            .exit_codes
            .get(invocation.tool.as_str())
            .copied()
            .unwrap_or(0);
        let output = format!("{} {}", invocation.tool, invocation.arguments);
        log.append_line(&output);

        Ok(ProcessOutput {
            exit_code: Some(code),
            success: code == 0,
            output,
        })
    }
}
