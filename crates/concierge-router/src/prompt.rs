//! Instruction templates sent to the model gateway
//!
//! The wording is part of the routing contract: the classifier validates the
//! model's answer against exactly the labels enumerated here.

use concierge_domain::InstructionTemplate;

/// Routing template: three-category enumeration plus a strict JSON directive
pub const ROUTING_TEMPLATE: InstructionTemplate = InstructionTemplate::from_static(
    "routing",
    r#"# Strictly follow these categories:
    - OrdersAgent: Order status/shipping questions
    - ReturnsAgent: Returns/refunds/exchanges
    - GeneralAgent: Other inquiries

# Must follow instruction:
- Please make sure spellings are correct
- Must follow JSON output format:
{{
"Category": "OrdersAgent|ReturnsAgent|GeneralAgent",
"Reasoning": "Reasoning for the category choice"
}}
Query: {input}
Response:"#,
);

/// Extraction template: the answer is the bare identifier or `null`
pub const EXTRACTION_TEMPLATE: InstructionTemplate = InstructionTemplate::from_static(
    "extraction",
    r#"Extract order ID from query or respond with null.

Query: {input}
Order ID (only the ID or null):"#,
);
