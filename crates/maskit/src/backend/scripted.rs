//! Scripted runner returning canned output, for tests and offline previews.

use crate::backend::Runner;
use crate::error::{Error, Result};
use crate::types::CommandOutput;
use std::collections::HashMap;
use std::sync::Mutex;

/// Runner that answers each `mas` subcommand with a fixed output and records
/// every argv it receives.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    /// Create a runner with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `subcommand` (e.g. "list") with `output`.
    pub fn respond(mut self, subcommand: &str, output: CommandOutput) -> Self {
        self.responses.insert(subcommand.to_string(), output);
        self
    }

    /// Answer `subcommand` with a successful exit and `stdout`.
    pub fn ok(self, subcommand: &str, stdout: &str) -> Self {
        self.respond(subcommand, CommandOutput::ok(stdout))
    }

    /// Answer `subcommand` with exit code 1 and `stderr`.
    pub fn fail(self, subcommand: &str, stderr: &str) -> Self {
        self.respond(subcommand, CommandOutput::failed(1, stderr))
    }

    /// Every argv received so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// How many times `subcommand` was run.
    pub fn count(&self, subcommand: &str) -> usize {
        self.calls()
            .iter()
            .filter(|argv| argv.first().map(String::as_str) == Some(subcommand))
            .count()
    }
}

impl Runner for ScriptedRunner {
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(args.iter().map(|a| (*a).to_string()).collect());
        }

        let subcommand = args.first().copied().unwrap_or_default();
        self.responses
            .get(subcommand)
            .cloned()
            .ok_or_else(|| Error::tool(format!("no scripted response for mas {subcommand}")))
    }
}
