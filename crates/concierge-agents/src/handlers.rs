//! Downstream handlers, one per intent
//!
//! Handlers never fail: lookup and gateway errors become reply text.

use crate::policy::PolicyBook;
use concierge_domain::traits::{ModelGateway, OrderLookup};
use concierge_domain::{InstructionTemplate, OrderStatus, TemplateVars};
use std::fmt::Display;
use tracing::{debug, warn};

/// Shortest identifier the orders handler will look up
pub const MIN_ORDER_ID_LEN: usize = 5;

/// Passages retrieved per returns question
pub const DEFAULT_TOP_K: usize = 2;

/// Reply when the orders handler has no usable identifier
pub const MISSING_ORDER_ID_REPLY: &str = "Please provide a valid order number (e.g. 123456)";

/// Status text for orders past the return window
pub const NOT_RETURNABLE_MESSAGE: &str =
    "Your order is not eligible for return, it has been more than 30 days since it was shipped";

/// Reply for anything outside orders and returns
pub const GENERAL_REPLY: &str = "I can only help with orders and returns. How can I assist you?";

/// Prompt for answering a returns question from retrieved policy passages
pub const RETURNS_TEMPLATE: InstructionTemplate = InstructionTemplate::from_static(
    "returns",
    r#"You are a helpful customer service assistant. Use the following return policy information to answer the customer's question.

{context}

Question: {input}
Answer:"#,
);

/// Answers order-status questions through an [`OrderLookup`]
pub struct OrdersHandler<L> {
    lookup: L,
}

impl<L> OrdersHandler<L>
where
    L: OrderLookup,
    L::Error: Display,
{
    /// Create a handler backed by `lookup`
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Reply for an order-status question about `identifier`
    pub fn respond(&self, identifier: Option<&str>) -> String {
        let order_id = match identifier {
            Some(id) if id.chars().count() >= MIN_ORDER_ID_LEN => id,
            _ => return MISSING_ORDER_ID_REPLY.to_string(),
        };

        match self.lookup.lookup(order_id) {
            Ok(Some(order)) => format!("Order {}: {}", order_id, status_text(&order)),
            Ok(None) => format!(
                "No order found with ID {}. Please check and try again.",
                order_id
            ),
            Err(e) => {
                warn!("Order lookup for {} failed: {}", order_id, e);
                format!("Unexpected error: {}", e)
            }
        }
    }
}

/// Status as shown to the customer
///
/// Orders shipped 30 or more days ago read as the return-window notice
/// instead of their raw status.
pub fn status_text(order: &OrderStatus) -> &str {
    if order.is_returnable() {
        &order.status
    } else {
        NOT_RETURNABLE_MESSAGE
    }
}

/// Answers returns questions from policy passages via the model gateway
pub struct ReturnsHandler<G> {
    gateway: G,
    policies: PolicyBook,
    template: InstructionTemplate,
    top_k: usize,
}

impl<G> ReturnsHandler<G>
where
    G: ModelGateway,
    G::Error: Display,
{
    /// Create a handler with the standard policies
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            policies: PolicyBook::standard(),
            template: RETURNS_TEMPLATE,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Replace the policy passages
    pub fn with_policies(mut self, policies: PolicyBook) -> Self {
        self.policies = policies;
        self
    }

    /// Number of passages placed in the prompt
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Replace the returns template
    pub fn with_template(mut self, template: InstructionTemplate) -> Self {
        self.template = template;
        self
    }

    /// Answer a policy question
    pub fn respond(&self, query: &str) -> String {
        match self.check_policy(query) {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Policy check failed: {}", e);
                format!("Policy check error: {}", e)
            }
        }
    }

    /// Answer a policy question and, when possible, the order's eligibility
    pub fn respond_with_order<L>(&self, query: &str, identifier: Option<&str>, lookup: &L) -> String
    where
        L: OrderLookup,
        L::Error: Display,
    {
        let answer = self.respond(query);
        match identifier.and_then(|id| eligibility_line(lookup, id)) {
            Some(line) => format!("{}\n{}", answer, line),
            None => answer,
        }
    }

    fn check_policy(&self, query: &str) -> Result<String, crate::AgentError> {
        let context = self.policies.top_k(query, self.top_k).join("\n");
        debug!("Returns context: {} passages", self.top_k.min(self.policies.len()));

        let prompt = self
            .template
            .render(&TemplateVars::input(query).with("context", context))?;

        let answer = self
            .gateway
            .complete(&prompt)
            .map_err(|e| crate::AgentError::Gateway(e.to_string()))?;

        Ok(answer.trim().to_string())
    }
}

/// Return eligibility of one order, or `None` when it cannot be determined
fn eligibility_line<L>(lookup: &L, order_id: &str) -> Option<String>
where
    L: OrderLookup,
    L::Error: Display,
{
    match lookup.lookup(order_id) {
        Ok(Some(order)) if order.is_returnable() => Some(format!(
            "Order {} is eligible for return (shipped {} days ago).",
            order_id, order.days_shipped
        )),
        Ok(Some(_)) => Some(format!("Order {}: {}", order_id, NOT_RETURNABLE_MESSAGE)),
        Ok(None) => Some(format!("No order found with ID {}.", order_id)),
        Err(e) => {
            warn!("Eligibility lookup for {} failed: {}", order_id, e);
            None
        }
    }
}

/// Fixed reply for out-of-scope questions
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralHandler;

impl GeneralHandler {
    /// The general reply
    pub fn respond(&self) -> &'static str {
        GENERAL_REPLY
    }
}
