//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Every line that is not a REPL command is one conversation turn. The
//! identifier resolved on one turn is carried into the next.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    let mut conversation = commands::build_conversation(config)?;

    println!(
        "{}",
        formatter.info(&format!(
            "Concierge ({}) - Type 'help' for commands, 'exit' to quit",
            conversation.router().model_name()
        ))
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    if let Err(e) = editor.load_history(&history_path) {
        debug!("No history loaded from {}: {}", history_path.display(), e);
    }

    loop {
        let prompt = match conversation.last_identifier() {
            Some(identifier) => format!("concierge [{}]> ", identifier),
            None => "concierge> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(ReplCommand::Reset) => {
                        conversation.reset();
                        println!("{}", formatter.success("Conversation context cleared"));
                    }
                    Ok(ReplCommand::Order(identifier)) => {
                        conversation.set_identifier(identifier);
                        if let Some(identifier) = conversation.last_identifier() {
                            println!("{}", formatter.success(&format!("Using order {}", identifier)));
                        }
                    }
                    Ok(ReplCommand::Ask(text)) => {
                        let turn = conversation.turn(&text);
                        if turn.outcome.decision.is_failure() {
                            eprintln!("{}", formatter.warning(&turn.outcome.decision.reasoning));
                        }
                        println!("{}", formatter.reply_line(&turn));
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    Reset,
    Order(String),
    Ask(String),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some(first) = parts.first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match *first {
        "exit" | "quit" | "q" if parts.len() == 1 => Ok(ReplCommand::Exit),
        "help" | "?" if parts.len() == 1 => Ok(ReplCommand::Help),
        "reset" if parts.len() == 1 => Ok(ReplCommand::Reset),
        ":order" => match parts.get(1) {
            Some(identifier) if parts.len() == 2 => Ok(ReplCommand::Order(identifier.to_string())),
            _ => Err(CliError::InvalidInput("Usage: :order <id>".to_string())),
        },
        _ => Ok(ReplCommand::Ask(line.to_string())),
    }
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let concierge_dir = home.join(".concierge");
    std::fs::create_dir_all(&concierge_dir)?;
    Ok(concierge_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <question>          - Ask about an order, a return, or anything else");
    println!("  :order <id>         - Use this order number for follow-up questions");
    println!("  reset               - Forget the current order number");
    println!("  help, ?             - Show this help");
    println!("  exit, quit, q       - Exit REPL");
    println!();
}
