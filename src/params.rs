//! Module parameters: flags, environment, args file and config merged into
//! one [`AppSpec`].

use anyhow::{Context, Result, bail};
use maskit::{AppSpec, DesiredState};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

use crate::cli::ApplyArgs;
use crate::config::{self, Config};

/// Parameters as handed over by an automation framework.
///
/// Keys match the command-line flags. `check_mode` also accepts the
/// `_ansible_check_mode` spelling.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArgsFile {
    #[serde(deserialize_with = "id_string")]
    pub id: Option<String>,
    pub state: Option<DesiredState>,
    pub account: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "_ansible_check_mode")]
    pub check_mode: bool,
}

/// Store ids are numeric, so accept them unquoted as well.
fn id_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

impl ArgsFile {
    /// Load an args file. `.toml` files are parsed as TOML, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let path = config::expand(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let parsed: Result<Self> = if is_toml {
            toml::from_str(&content).map_err(anyhow::Error::from)
        } else {
            serde_json::from_str(&content).map_err(anyhow::Error::from)
        };
        parsed.with_context(|| format!("Invalid args file format in {}", path.display()))
    }
}

/// Everything `apply` needs to run.
#[derive(Debug)]
pub struct Params {
    pub spec: AppSpec,
    pub check_mode: bool,
}

/// Merge the parameter sources. Flags (and their environment variables) win
/// over the args file, which wins over the config file.
pub fn resolve(args: &ApplyArgs, file: ArgsFile, config: &Config) -> Result<Params> {
    let id = args.id.clone().or(file.id);
    let state = args.state.map(DesiredState::from).or(file.state);
    let account = args
        .account
        .clone()
        .or(file.account)
        .or_else(|| config.account.clone());
    let password = args.password.clone().or(file.password);

    // Required means present; an empty value is passed through as given
    let (Some(id), Some(account), Some(password)) = (&id, &account, &password) else {
        let missing: Vec<&str> = [("id", &id), ("account", &account), ("password", &password)]
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect();
        bail!("missing required arguments: {}", missing.join(", "));
    };

    Ok(Params {
        spec: AppSpec::new(
            id.as_str(),
            state.unwrap_or_default(),
            account.as_str(),
            password.as_str(),
        ),
        check_mode: args.check || file.check_mode,
    })
}
