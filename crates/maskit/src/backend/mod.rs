//! Backend abstraction for running `mas`.
//!
//! The [`Runner`] trait is the only way the reconciler reaches the outside
//! world, allowing for different implementations (real CLI, scripted
//! responses for testing).

pub mod process;
pub mod scripted;

use crate::error::Result;
use crate::types::CommandOutput;

/// Runs a single `mas` command.
///
/// `args` is everything after the program name, e.g. `["install", "497799835"]`.
/// A non-zero exit is NOT an error at this level: implementations return the
/// captured output and leave the exit code to the caller. Errors are reserved
/// for failing to run the command at all.
pub trait Runner: Send + Sync {
    /// Run `mas` with `args` and capture its output.
    fn run(&self, args: &[&str]) -> Result<CommandOutput>;
}

/// Render an argv for logs, hiding the password of `signin`.
pub fn display_args(args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 2 && args.first() == Some(&"signin") {
                "********"
            } else {
                *arg
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
