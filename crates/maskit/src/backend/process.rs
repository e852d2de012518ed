//! Real mas CLI backend using `std::process::Command`.

use crate::backend::Runner;
use crate::error::{Error, Result};
use crate::types::CommandOutput;
use std::path::Path;
use std::process::Command;

/// Runner that executes the real `mas` binary.
#[derive(Debug, Clone)]
pub struct MasCli {
    /// Path to the mas executable
    mas_path: String,
}

impl MasCli {
    /// Locate `mas` and create a runner for it.
    ///
    /// Returns an error if mas is not installed.
    pub fn new() -> Result<Self> {
        let mas_path = find_mas()?;
        log::debug!("found mas at {mas_path}");
        Ok(Self { mas_path })
    }

    /// Use an explicit executable path.
    ///
    /// The path is not checked up front; a bad path surfaces as a spawn error
    /// on the first command.
    pub fn with_path(mas_path: impl Into<String>) -> Self {
        Self {
            mas_path: mas_path.into(),
        }
    }
}

impl Runner for MasCli {
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(&self.mas_path)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.mas_path.clone(),
                source,
            })?;
        Ok(output.into())
    }
}

/// Find the mas executable path.
fn find_mas() -> Result<String> {
    let paths = [
        "/opt/homebrew/bin/mas", // Apple Silicon
        "/usr/local/bin/mas",    // Intel
    ];

    for path in &paths {
        if Path::new(path).exists() {
            return Ok((*path).to_string());
        }
    }

    let output = Command::new("which")
        .arg("mas")
        .output()
        .map_err(|_| Error::MasNotFound)?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Ok(path);
        }
    }

    Err(Error::MasNotFound)
}
