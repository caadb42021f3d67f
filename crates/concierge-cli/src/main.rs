//! Concierge CLI - route customer-service questions from the command line.

use clap::Parser;
use concierge_cli::commands;
use concierge_cli::repl;
use concierge_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> concierge_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };

    // Create the default file on first run
    if !config_path.exists() && !matches!(cli.command, Some(Command::Config(_))) {
        if let Err(e) = Config::default().save_to(&config_path) {
            tracing::warn!("Could not write default config to {}: {}", config_path.display(), e);
        }
    }

    let mut config = Config::load_from(&config_path)?;
    if cli.parallel {
        config.router.parallel = true;
    }

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        None | Some(Command::Repl) => {
            return repl::run_repl(&config, &formatter);
        }
        Some(Command::Ask(args)) => commands::execute_ask(args, &config, &formatter)?,
        Some(Command::Route(args)) => commands::execute_route(args, &config, &formatter)?,
        Some(Command::Extract(args)) => commands::execute_extract(args, &config, &formatter)?,
        Some(Command::Config(args)) => commands::execute_config(args, &config, &config_path, &formatter)?,
    };

    println!("{}", output);
    Ok(())
}
