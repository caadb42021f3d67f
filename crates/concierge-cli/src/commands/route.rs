//! Route and extract commands: show routing decisions without answering.

use crate::cli::QueryArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use concierge_domain::Query;

use super::build_router;

fn build_query(args: QueryArgs) -> Result<Query> {
    let text = args.text();
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".into()));
    }
    let query = Query::new(text);
    Ok(match args.order_id {
        Some(known) => query.with_known_identifier(known),
        None => query,
    })
}

/// Execute the route command.
pub fn execute_route(args: QueryArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let query = build_query(args)?;
    let outcome = build_router(config)?.route(&query);
    formatter.format_outcome(&outcome)
}

/// Execute the extract command.
pub fn execute_extract(args: QueryArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let query = build_query(args)?;
    let resolution = build_router(config)?.resolve_identifier(&query);
    formatter.format_resolution(&resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use concierge_llm::GatewayConfig;

    fn args(text: &str, order_id: Option<&str>) -> QueryArgs {
        QueryArgs {
            query: text.split_whitespace().map(str::to_string).collect(),
            order_id: order_id.map(str::to_string),
        }
    }

    fn mock_config(reply: &str) -> Config {
        Config {
            gateway: GatewayConfig::mock(reply),
            ..Config::default()
        }
    }

    #[test]
    fn test_extract_pattern_identifier() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = execute_extract(args("Where is ORDER-123456?", None), &mock_config("null"), &formatter).unwrap();
        assert_eq!(output, "123456");
    }

    #[test]
    fn test_extract_nothing() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = execute_extract(args("hello", None), &mock_config("null"), &formatter).unwrap();
        assert_eq!(output, "null");
    }

    #[test]
    fn test_extract_uses_known_identifier() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = execute_extract(
            args("when will it arrive", Some("777888")),
            &mock_config("null"),
            &formatter,
        )
        .unwrap();
        assert_eq!(output, "777888");
    }

    #[test]
    fn test_route_returns_intent() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let config = mock_config(r#"{"Category":"ReturnsAgent","Reasoning":"refund"}"#);
        let output = execute_route(args("can I return my shoes", None), &config, &formatter).unwrap();
        assert_eq!(output, "ReturnsAgent");
    }
}
