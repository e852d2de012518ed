//! # maskit
//!
//! Converge Mac App Store apps to a declared state using the
//! [`mas`](https://github.com/mas-cli/mas) command-line tool.
//!
//! An [`AppSpec`] names an app id, the desired state ([`DesiredState::Present`]
//! or [`DesiredState::Latest`]) and the Apple account to use. Running it:
//!
//! 1. signs in with the account unless it is already the active one,
//! 2. installs the app if `mas list` does not show it,
//! 3. for `Latest`, reinstalls it if `mas outdated` shows it.
//!
//! The returned [`Outcome`] says what changed. The first failing `mas`
//! command aborts the run with its stderr as the error message.
//!
//! ## Example
//!
//! ```no_run
//! use maskit::{AppSpec, Client, DesiredState};
//!
//! let client = Client::new().expect("mas not available");
//! let spec = AppSpec::new("497799835", DesiredState::Latest, "me@example.com", "secret");
//!
//! let outcome = client.converge(&spec, false).expect("converge failed");
//! if outcome.changed() {
//!     println!("updated Xcode");
//! }
//! ```
//!
//! ## Dry run
//!
//! With `dry_run = true` the account, list and outdated queries still run,
//! but nothing is signed in or installed. The outcome reports what would
//! have changed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod matching;
pub mod reconcile;
pub mod types;

pub use error::{Error, Result};
pub use reconcile::StateReconciler;
pub use types::{AppSpec, CommandOutput, DesiredState, Outcome};

use backend::{Runner, process::MasCli};

/// High-level client for Mac App Store operations.
pub struct Client {
    runner: Box<dyn Runner>,
}

impl Client {
    /// Create a client for the `mas` found on this machine.
    ///
    /// Returns an error if mas is not installed.
    pub fn new() -> Result<Self> {
        let runner = MasCli::new()?;
        Ok(Self {
            runner: Box::new(runner),
        })
    }

    /// Create a client for a specific `mas` executable.
    pub fn with_mas_path(path: impl Into<String>) -> Self {
        Self {
            runner: Box::new(MasCli::with_path(path)),
        }
    }

    /// Create a client with a custom runner (useful for testing).
    pub fn with_runner(runner: Box<dyn Runner>) -> Self {
        Self { runner }
    }

    /// Bring the app described by `spec` to its desired state.
    pub fn converge(&self, spec: &AppSpec, dry_run: bool) -> Result<Outcome> {
        StateReconciler::new(self.runner.as_ref(), dry_run).run(spec)
    }
}
