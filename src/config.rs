use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("masctl"))
}

/// User settings from `config.toml`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Explicit path to the mas executable
    pub mas_path: Option<String>,
    /// Account used when none is given on the command line or in an args file
    pub account: Option<String>,
}

impl Config {
    /// Load the config.
    ///
    /// An explicit `path` must exist. Without one, a missing default file
    /// means default settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => expand(p),
            None => {
                let default = config_dir()?.join("config.toml");
                if !default.exists() {
                    log::debug!("no config at {}, using defaults", default.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Expanded mas executable path, if configured.
    pub fn mas_path(&self) -> Option<String> {
        self.mas_path
            .as_deref()
            .map(|p| shellexpand::tilde(p).into_owned())
    }
}

/// Expand a leading `~` in a path.
pub fn expand(path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    PathBuf::from(expanded)
}
