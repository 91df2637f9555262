//! Command-line interface.

pub mod check;
pub mod completions;
pub mod output;
pub mod push;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::config::{Settings, TargetsSetting};
use crate::core::secret::SecretString;
use crate::error::Result;

/// secret-dispatch - push encrypted secrets to GitHub organizations and repositories.
#[derive(Parser)]
#[command(
    name = "secret-dispatch",
    about = "Push encrypted secrets to GitHub organizations and repositories",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// TOML file with default settings
    #[arg(long, global = true, env = "SECRET_DISPATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt and write every secret to every target
    Push {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Validate inputs and show where secrets would go, without network calls
    Check {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Run inputs. Each falls back to the matching GitHub Actions input variable.
#[derive(Args, Debug, Clone, Default)]
pub struct Inputs {
    /// API token with permission to write secrets
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// JSON file holding the secrets ({"secret": {"NAME": "value"}})
    #[arg(long = "json-path", env = "INPUT_JSON-PATH")]
    pub json_path: Option<PathBuf>,

    /// Comma-separated targets: `org` or `owner/repo`
    #[arg(long, env = "INPUT_TARGETS")]
    pub targets: Option<String>,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Visibility of organization secrets: all or private
    #[arg(long)]
    pub visibility: Option<String>,
}

impl Inputs {
    /// The command-line/environment layer of the configuration.
    ///
    /// A missing token falls back to `GITHUB_TOKEN`.
    pub fn settings(&self) -> Settings {
        let token = self
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .map(SecretString::from);

        Settings {
            token,
            secrets_path: self.json_path.clone(),
            targets: self.targets.clone().map(TargetsSetting::Csv),
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            visibility: self.visibility.clone(),
        }
    }
}

/// Log output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Merge the flag/env layer over the optional config file.
pub fn load_settings(inputs: &Inputs, config: Option<&PathBuf>) -> Result<Settings> {
    let file = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    Ok(inputs.settings().or(file))
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.config;

    match cli.command {
        Command::Push { inputs } => push::execute(load_settings(&inputs, config.as_ref())?),
        Command::Check { inputs } => check::execute(load_settings(&inputs, config.as_ref())?),
        Command::Completions { shell } => completions::execute(shell),
    }
}
