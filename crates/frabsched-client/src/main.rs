//! frabsched CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use frabsched_client::cli::{Cli, Command, ConfigAction};
use frabsched_client::commands;
use frabsched_client::config::ClientConfig;
use frabsched_client::error::{ClientError, ClientResult};
use frabsched_client::output::OutputFormat;
use frabsched_core::tracing::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config)?,
        None => ClientConfig::load().map_err(ClientError::Config)?,
    };

    let log_format = cli
        .log_format
        .parse()
        .map_err(|e| ClientError::Config(format!("{}", e)))?;
    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    init_tracing(tracing_config.with_format(log_format))
        .map_err(|e| ClientError::Config(e.to_string()))?;

    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.timeout));
    let format = OutputFormat::from_json_flag(cli.json);

    match cli.command {
        Command::Fetch { url, group } => {
            commands::schedule::fetch(&url, group, timeout, format).await
        }
        Command::Parse { file, group } => commands::schedule::parse(&file, group, format),
        Command::Sources => {
            commands::schedule::sources(&config, &config_path, timeout, format).await
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
