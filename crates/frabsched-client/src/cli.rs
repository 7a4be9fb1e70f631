//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// frabsched - Frab conference schedules as flat event records
#[derive(Debug, Parser)]
#[command(name = "frabsched")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FRABSCHED_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output records as a JSON array
    #[arg(long, global = true)]
    pub json: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Log format: compact, pretty or json
    #[arg(long, global = true, default_value = "compact")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download a schedule and print its events
    Fetch {
        /// Schedule XML URL
        url: String,

        /// Group label for the records (defaults to the URL host)
        #[arg(long, short)]
        group: Option<String>,
    },

    /// Parse a local schedule file ("-" reads stdin)
    Parse {
        /// Path to the schedule XML
        file: PathBuf,

        /// Group label for the records (defaults to the file stem)
        #[arg(long, short)]
        group: Option<String>,
    },

    /// Fetch every source listed in the configuration file
    Sources,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_fetch() {
        let cli = Cli::try_parse_from([
            "frabsched",
            "--json",
            "fetch",
            "https://example.org/schedule.xml",
            "-g",
            "demo",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Fetch { url, group } => {
                assert_eq!(url, "https://example.org/schedule.xml");
                assert_eq!(group.as_deref(), Some("demo"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["frabsched", "parse", "s.xml", "--timeout", "5", "-v"])
            .unwrap();
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::Parse { group: None, .. }));
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["frabsched", "--timeout", "0", "sources"]).is_err());
        let cli = Cli::try_parse_from(["frabsched", "--timeout", "1", "sources"]).unwrap();
        assert_eq!(cli.timeout, Some(1));
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["frabsched"]).is_err());
    }
}
