//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use concierge_agents::Turn;
use concierge_domain::Identifier;
use concierge_router::{IdentifierResolution, RouteOutcome};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a routing outcome.
    pub fn format_outcome(&self, outcome: &RouteOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&outcome_json(outcome))?),
            OutputFormat::Table => Ok(self.table(outcome_rows(outcome))),
            OutputFormat::Quiet => Ok(outcome.intent().to_string()),
        }
    }

    /// Format an identifier resolution.
    pub fn format_resolution(&self, resolution: &IdentifierResolution) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "identifier": identifier_json(resolution.identifier.as_ref()),
                "normalized_text": resolution.normalized_text,
                "pattern_matched": resolution.pattern_matched,
                "fallback_invoked": resolution.fallback_invoked,
            }))?),
            OutputFormat::Table => {
                let mut rows = identifier_rows(resolution.identifier.as_ref());
                rows.push(("Normalized", resolution.normalized_text.clone()));
                rows.push(("Pattern matched", yes_no(resolution.pattern_matched)));
                rows.push(("Fallback used", yes_no(resolution.fallback_invoked)));
                Ok(self.table(rows))
            }
            OutputFormat::Quiet => Ok(resolution
                .identifier
                .as_ref()
                .map_or_else(|| "null".to_string(), |id| id.value.clone())),
        }
    }

    /// Format an answered turn.
    pub fn format_turn(&self, turn: &Turn) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = outcome_json(&turn.outcome);
                value["response"] = Value::String(turn.reply.response.clone());
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let table = self.table(outcome_rows(&turn.outcome));
                Ok(format!("{}\n\n{}", table, turn.reply.response))
            }
            OutputFormat::Quiet => Ok(turn.reply.response.clone()),
        }
    }

    /// One-line reply for interactive mode.
    pub fn reply_line(&self, turn: &Turn) -> String {
        let label = format!("[{}]", turn.reply.intent);
        format!("{} {}", self.colorize(&label, "cyan"), turn.reply.response)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, rows: Vec<(&str, String)>) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (field, value) in rows {
            builder.push_record([field.to_string(), value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn outcome_json(outcome: &RouteOutcome) -> Value {
    json!({
        "query_id": outcome.query_id.to_string(),
        "intent": outcome.intent().as_str(),
        "reasoning": outcome.decision.reasoning,
        "identifier": identifier_json(outcome.identifier.as_ref()),
        "fallback_invoked": outcome.fallback_invoked,
        "stages": outcome.stages.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    })
}

fn identifier_json(identifier: Option<&Identifier>) -> Value {
    match identifier {
        Some(id) => json!({ "value": id.value, "source": id.source.to_string() }),
        None => Value::Null,
    }
}

fn outcome_rows(outcome: &RouteOutcome) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Intent", outcome.intent().to_string()),
        ("Reasoning", outcome.decision.reasoning.clone()),
    ];
    rows.extend(identifier_rows(outcome.identifier.as_ref()));
    rows.push(("Fallback used", yes_no(outcome.fallback_invoked)));
    rows.push((
        "Stages",
        outcome
            .stages
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" → "),
    ));
    rows
}

fn identifier_rows(identifier: Option<&Identifier>) -> Vec<(&'static str, String)> {
    match identifier {
        Some(id) => vec![("Identifier", id.value.clone()), ("Source", id.source.to_string())],
        None => vec![("Identifier", "none".to_string())],
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
