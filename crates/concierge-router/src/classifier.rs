//! Intent classification through the model gateway

use crate::error::ClassificationError;
use crate::parser::parse_routing_output;
use crate::prompt::ROUTING_TEMPLATE;
use concierge_domain::traits::ModelGateway;
use concierge_domain::{InstructionTemplate, RoutingDecision, TemplateVars};
use std::fmt::Display;
use tracing::{debug, warn};

/// Classifies query text into one of the three intents
///
/// [`IntentClassifier::classify`] is total: every failure, from transport
/// errors to an unknown category, becomes a general-intent decision whose
/// reasoning starts with `"Routing failed: "`.
pub struct IntentClassifier<G> {
    gateway: G,
    template: InstructionTemplate,
}

impl<G> IntentClassifier<G>
where
    G: ModelGateway,
    G::Error: Display,
{
    /// Create a classifier using the standard routing template
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            template: ROUTING_TEMPLATE,
        }
    }

    /// Replace the routing template
    pub fn with_template(mut self, template: InstructionTemplate) -> Self {
        self.template = template;
        self
    }

    /// Classify `text`; never fails
    pub fn classify(&self, text: &str) -> RoutingDecision {
        match self.try_classify(text) {
            Ok(decision) => {
                debug!("Classified as {}: {}", decision.intent, decision.reasoning);
                decision
            }
            Err(e) => {
                warn!("Routing failed: {}", e);
                RoutingDecision::failed(e)
            }
        }
    }

    /// Classify `text`, surfacing the failure cause
    ///
    /// Makes exactly one gateway call.
    pub fn try_classify(&self, text: &str) -> Result<RoutingDecision, ClassificationError> {
        let prompt = self.template.render(&TemplateVars::input(text))?;

        let raw = self
            .gateway
            .complete(&prompt)
            .map_err(|e| ClassificationError::Gateway(e.to_string()))?;

        debug!("Routing model output: {} chars", raw.len());

        parse_routing_output(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::Intent;
    use concierge_llm::MockGateway;

    fn classify_with(reply: &str) -> RoutingDecision {
        IntentClassifier::new(MockGateway::new(reply)).classify("some query")
    }

    #[test]
    fn test_valid_orders_reply() {
        let decision = classify_with(r#"{"Category":"OrdersAgent","Reasoning":"order status question"}"#);
        assert_eq!(decision.intent, Intent::Orders);
        assert_eq!(decision.reasoning, "order status question");
    }

    #[test]
    fn test_fenced_reply() {
        let decision = classify_with("```json\n{\"Category\":\"ReturnsAgent\",\"Reasoning\":\"refund\"}\n```");
        assert_eq!(decision.intent, Intent::Returns);
    }

    #[test]
    fn test_invalid_json_defaults_to_general() {
        let decision = classify_with("%%% not json %%%");
        assert_eq!(decision.intent, Intent::General);
        assert!(decision.reasoning.starts_with("Routing failed: Malformed model output:"));
    }

    #[test]
    fn test_unknown_category_defaults_to_general() {
        let decision = classify_with(r#"{"Category":"BillingAgent","Reasoning":"invoice"}"#);
        assert_eq!(decision.intent, Intent::General);
        assert_eq!(decision.reasoning, "Routing failed: Unexpected category: BillingAgent");
    }

    #[test]
    fn test_transport_error_defaults_to_general() {
        let decision = IntentClassifier::new(MockGateway::failing("connection refused")).classify("x");
        assert_eq!(decision.intent, Intent::General);
        assert_eq!(
            decision.reasoning,
            "Routing failed: Communication error: connection refused"
        );
    }

    #[test]
    fn test_template_error_defaults_to_general() {
        let template = InstructionTemplate::from_static("broken", "{context} {input}");
        let classifier = IntentClassifier::new(MockGateway::new("{}")).with_template(template);
        let decision = classifier.classify("x");
        assert_eq!(decision.intent, Intent::General);
        assert!(decision.reasoning.contains("slot 'context'"));
    }

    #[test]
    fn test_template_error_skips_gateway() {
        let gateway = MockGateway::new("{}");
        let template = InstructionTemplate::from_static("broken", "{context}");
        let classifier = IntentClassifier::new(gateway.clone()).with_template(template);
        classifier.classify("x");
        assert_eq!(gateway.call_count(), 0);
    }

    #[test]
    fn test_exactly_one_gateway_call() {
        let gateway = MockGateway::new("garbage");
        let classifier = IntentClassifier::new(gateway.clone());
        classifier.classify("x");
        assert_eq!(gateway.call_count(), 1);
    }

    #[test]
    fn test_prompt_embeds_query() {
        let gateway = MockGateway::new(r#"{"Category":"GeneralAgent","Reasoning":"hi"}"#);
        IntentClassifier::new(gateway.clone()).classify("Hello there");
        let prompts = gateway.prompts();
        assert!(prompts[0].contains("Query: Hello there\nResponse:"));
        assert!(prompts[0].contains("Strictly follow these categories"));
    }

    #[test]
    fn test_try_classify_surfaces_cause() {
        let classifier = IntentClassifier::new(MockGateway::new(r#"{"Category":"Nope"}"#));
        assert_eq!(
            classifier.try_classify("x").unwrap_err(),
            ClassificationError::UnexpectedCategory("Nope".to_string())
        );
    }
}
