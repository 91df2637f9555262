//! secret-dispatch - push encrypted secrets to GitHub organizations and repositories.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secret_dispatch::cli::output;
use secret_dispatch::cli::{execute, Cli, LogFormat};
use secret_dispatch::core::constants;
use secret_dispatch::error::{ConfigError, Error, ErrorKind};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secret_dispatch=debug")
        } else {
            EnvFilter::new("secret_dispatch=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    if let Err(e) = execute(cli) {
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Config(ConfigError::MissingField { .. }) => {
                Some("pass --token, --json-path and --targets, or set the INPUT_* variables")
            }
            _ => match e.kind() {
                ErrorKind::Auth => Some("check that the token can read and write Actions secrets"),
                ErrorKind::NotFound => Some("check the target name and that the token can see it"),
                _ => None,
            },
        };

        output::error(&error_msg);
        output::workflow_error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
