//! Ask command: route a question and answer it.

use crate::cli::AskArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

use super::build_conversation;

/// Execute the ask command.
pub fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let text = args.text();
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".into()));
    }

    let mut conversation = build_conversation(config)?;
    if let Some(order_id) = args.order_id {
        conversation.set_identifier(order_id);
    }

    let turn = conversation.turn(&text);
    formatter.format_turn(&turn)
}
