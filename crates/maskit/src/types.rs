//! Core types for declaring and reporting app state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Desired install state of an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Installed, any version
    #[default]
    Present,
    /// Installed and without pending updates
    Latest,
}

impl DesiredState {
    /// Name used on the command line and in results.
    pub fn as_str(&self) -> &'static str {
        match self {
            DesiredState::Present => "present",
            DesiredState::Latest => "latest",
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller wants for one app.
#[derive(Clone, PartialEq, Eq)]
pub struct AppSpec {
    /// App Store identifier (e.g. "497799835")
    pub id: String,
    /// Desired state
    pub state: DesiredState,
    /// Apple account to be signed in with
    pub account: String,
    /// Password for `account`
    pub password: String,
}

impl AppSpec {
    /// Create a new spec.
    pub fn new(
        id: impl Into<String>,
        state: DesiredState,
        account: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            state,
            account: account.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AppSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSpec")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("account", &self.account)
            .field("password", &"********")
            .finish()
    }
}

/// What a reconciliation run did (or, in dry-run, would have done).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Account signed in during this run
    pub signin: Option<String>,
    /// State reached by an install/update during this run
    pub state: Option<DesiredState>,
}

impl Outcome {
    /// True if anything was signed in, installed or updated.
    pub fn changed(&self) -> bool {
        self.signin.is_some() || self.state.is_some()
    }
}

/// Captured result of one `mas` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
