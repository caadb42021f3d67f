//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Concierge - route customer-service questions to the right handler.
#[derive(Debug, Parser)]
#[command(name = "concierge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CONCIERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Classify and extract concurrently
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Increase log verbosity (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (reply or identifier only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Route a question and answer it
    Ask(AskArgs),

    /// Show the routing decision for a question
    Route(QueryArgs),

    /// Show the identifier resolved from a question
    Extract(QueryArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Enter interactive conversation mode
    Repl,
}

/// Arguments for the ask command.
#[derive(Debug, Args)]
pub struct AskArgs {
    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Order number already known from context
    #[arg(short, long)]
    pub order_id: Option<String>,
}

impl AskArgs {
    /// The question as one string
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for the route and extract commands.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Order number already known from context
    #[arg(short, long)]
    pub order_id: Option<String>,
}

impl QueryArgs {
    /// The question as one string
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_repl() {
        let cli = Cli::parse_from(["concierge"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_ask_command_joins_words() {
        let cli = Cli::parse_from([
            "concierge",
            "ask",
            "Where",
            "is",
            "ORDER-123456?",
            "--order-id",
            "123456",
        ]);
        match cli.command {
            Some(Command::Ask(args)) => {
                assert_eq!(args.text(), "Where is ORDER-123456?");
                assert_eq!(args.order_id.as_deref(), Some("123456"));
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_route_requires_query() {
        assert!(Cli::try_parse_from(["concierge", "route"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["concierge", "extract", "tracking 12345", "-vv", "--format", "json", "--parallel"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.parallel);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Some(Command::Extract(_))));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["concierge", "config", "init", "--force"]);
        match cli.command {
            Some(Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            })) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }
}
