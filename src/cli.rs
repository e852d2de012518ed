use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "masctl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Declare the install state of Mac App Store apps", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/masctl/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and install or update an app until it matches the desired state
    Apply(ApplyArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ApplyArgs {
    /// App ID in the Mac App Store (e.g. 497799835)
    #[arg(long)]
    pub id: Option<String>,

    /// Desired state of the app [default: present]
    #[arg(long, value_enum)]
    pub state: Option<StateArg>,

    /// Apple account to sign in with
    #[arg(long, env = "MASCTL_ACCOUNT")]
    pub account: Option<String>,

    /// Password for the Apple account
    #[arg(long, env = "MASCTL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Report what would change without signing in or installing
    #[arg(long, visible_alias = "dry-run")]
    pub check: bool,

    /// Read parameters from a JSON or TOML file
    #[arg(long)]
    pub args_file: Option<PathBuf>,

    /// Result format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    /// Installed, any version
    Present,
    /// Installed and up to date
    Latest,
}

impl From<StateArg> for maskit::DesiredState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Present => maskit::DesiredState::Present,
            StateArg::Latest => maskit::DesiredState::Latest,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable result object
    Json,
    /// Colored human-readable lines
    Text,
}
