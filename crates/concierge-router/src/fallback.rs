//! Model-backed identifier extraction, used when no structural pattern matches

use crate::prompt::EXTRACTION_TEMPLATE;
use concierge_domain::traits::ModelGateway;
use concierge_domain::{Identifier, InstructionTemplate, TemplateVars};
use std::fmt::Display;
use tracing::{debug, warn};

/// Literal the extraction prompt asks for when there is no identifier
pub const NULL_SENTINEL: &str = "null";

/// Asks the model for an identifier the patterns could not find
///
/// Never fails: a gateway or template error is logged and treated as absence.
pub struct FallbackExtractor<G> {
    gateway: G,
    template: InstructionTemplate,
}

impl<G> FallbackExtractor<G>
where
    G: ModelGateway,
    G::Error: Display,
{
    /// Create an extractor using the standard extraction template
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            template: EXTRACTION_TEMPLATE,
        }
    }

    /// Replace the extraction template
    pub fn with_template(mut self, template: InstructionTemplate) -> Self {
        self.template = template;
        self
    }

    /// Extract an identifier from (normalized) query text
    ///
    /// Makes exactly one gateway call unless the template fails to render.
    pub fn extract(&self, text: &str) -> Option<Identifier> {
        let prompt = match self.template.render(&TemplateVars::input(text)) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Fallback extraction skipped: {}", e);
                return None;
            }
        };

        match self.gateway.complete(&prompt) {
            Ok(raw) => {
                let identifier = interpret_fallback_output(&raw);
                debug!(
                    "Fallback extraction returned {}",
                    identifier.as_ref().map_or("nothing", Identifier::as_str)
                );
                identifier
            }
            Err(e) => {
                warn!("Fallback extraction failed: {}", e);
                None
            }
        }
    }
}

/// Map raw model output to an identifier
///
/// Output is trimmed. The null sentinel (any case) and empty output mean
/// absence; anything else is the identifier, verbatim.
///
/// # Examples
///
/// ```
/// use concierge_router::interpret_fallback_output;
///
/// assert_eq!(interpret_fallback_output(" 12345\n").unwrap().value, "12345");
/// assert!(interpret_fallback_output("Null").is_none());
/// ```
pub fn interpret_fallback_output(raw: &str) -> Option<Identifier> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(NULL_SENTINEL) {
        return None;
    }
    Some(Identifier::from_fallback(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::IdentifierSource;
    use concierge_llm::MockGateway;

    #[test]
    fn test_identifier_is_trimmed() {
        let extractor = FallbackExtractor::new(MockGateway::new("  XK-9921 \n"));
        let id = extractor.extract("my package xk 9921").unwrap();
        assert_eq!(id.value, "XK-9921");
        assert_eq!(id.source, IdentifierSource::Fallback);
    }

    #[test]
    fn test_null_sentinel_any_case() {
        for reply in ["null", "Null", " null ", "NULL\n"] {
            let extractor = FallbackExtractor::new(MockGateway::new(reply));
            assert!(extractor.extract("nothing here").is_none(), "reply {:?}", reply);
        }
    }

    #[test]
    fn test_empty_reply_is_absence() {
        assert!(interpret_fallback_output("").is_none());
        assert!(interpret_fallback_output(" \n\t").is_none());
    }

    #[test]
    fn test_value_containing_null_is_kept() {
        assert_eq!(interpret_fallback_output("nullable-7").unwrap().value, "nullable-7");
    }

    #[test]
    fn test_gateway_error_is_absence() {
        let gateway = MockGateway::failing("timeout");
        let extractor = FallbackExtractor::new(gateway.clone());
        assert!(extractor.extract("where is it").is_none());
        assert_eq!(gateway.call_count(), 1);
    }

    #[test]
    fn test_prompt_embeds_text() {
        let gateway = MockGateway::new("null");
        FallbackExtractor::new(gateway.clone()).extract("where is 12345");
        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Query: where is 12345\n"));
    }

    #[test]
    fn test_broken_template_skips_gateway() {
        let gateway = MockGateway::new("123");
        let extractor = FallbackExtractor::new(gateway.clone())
            .with_template(InstructionTemplate::from_static("broken", "{order}"));
        assert!(extractor.extract("x").is_none());
        assert_eq!(gateway.call_count(), 0);
    }
}
