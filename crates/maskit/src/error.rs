//! Error types for mas operations.
//!
//! A failed `mas` invocation is reported with the tool's own error stream as
//! the message. There is no categorisation or retry: the first failure ends
//! the run.

use thiserror::Error;

/// Errors that can occur while talking to `mas`.
#[derive(Debug, Error)]
pub enum Error {
    /// `mas` ran and exited non-zero. Displays the stderr text verbatim.
    #[error("{stderr}")]
    Tool {
        /// Standard error output of the failed command
        stderr: String,
    },

    /// `mas` not found in any known location or in PATH
    #[error("mas not found. Install it with `brew install mas`")]
    MasNotFound,

    /// The app id does not form a valid line pattern
    #[error("invalid app id '{id}'")]
    InvalidId {
        /// The offending id
        id: String,
        /// Pattern compilation error
        #[source]
        source: regex::Error,
    },

    /// The process could not be started at all
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a tool error from the stderr of a failed command.
    pub fn tool(stderr: impl Into<String>) -> Self {
        Error::Tool {
            stderr: stderr.into(),
        }
    }

    /// Whether this error came from `mas` itself rather than from launching it.
    pub fn is_tool_error(&self) -> bool {
        matches!(self, Error::Tool { .. })
    }
}

/// Result type for mas operations.
pub type Result<T> = std::result::Result<T, Error>;
