//! Instruction templates - fixed prompt text with named slots
//!
//! A template is plain text containing `{name}` slots. Rendering substitutes
//! each slot with its value and turns `{{` / `}}` into literal braces, so JSON
//! examples can be embedded in a prompt. There is no control flow: rendering
//! is a single left-to-right substitution pass and substituted values are
//! never re-scanned.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Error produced when rendering a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template declares a slot that was given no value
    MissingSlot {
        /// Template name
        template: String,
        /// Slot name
        slot: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MissingSlot { template, slot } => {
                write!(f, "template '{}' has no value for slot '{}'", template, slot)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Values for template slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the common single-slot case
    pub fn input(text: impl Into<String>) -> Self {
        Self::new().with("input", text)
    }

    /// Set a slot value
    pub fn with(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(slot.into(), value.into());
        self
    }

    /// Look up a slot value
    pub fn get(&self, slot: &str) -> Option<&str> {
        self.values.get(slot).map(String::as_str)
    }
}

/// A fixed prompt with named slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTemplate {
    name: Cow<'static, str>,
    text: Cow<'static, str>,
}

impl InstructionTemplate {
    /// Create a template from static text (usable in `const` items)
    pub const fn from_static(name: &'static str, text: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            text: Cow::Borrowed(text),
        }
    }

    /// Create a template from owned text
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            text: Cow::Owned(text.into()),
        }
    }

    /// Template name, used in errors and logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template text, slots and escapes included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Slot names declared by the template, in order of first appearance
    pub fn slots(&self) -> Vec<&str> {
        let mut slots = Vec::new();
        for segment in Segments::new(&self.text) {
            if let Segment::Slot(name) = segment {
                if !slots.contains(&name) {
                    slots.push(name);
                }
            }
        }
        slots
    }

    /// Substitute every slot with its value
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_domain::{InstructionTemplate, TemplateVars};
    ///
    /// let template = InstructionTemplate::from_static("demo", "{{\"q\": \"{input}\"}}");
    /// let rendered = template.render(&TemplateVars::input("hi")).unwrap();
    /// assert_eq!(rendered, "{\"q\": \"hi\"}");
    /// ```
    pub fn render(&self, vars: &TemplateVars) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.text.len());
        for segment in Segments::new(&self.text) {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Slot(slot) => {
                    let value = vars.get(slot).ok_or_else(|| TemplateError::MissingSlot {
                        template: self.name.to_string(),
                        slot: slot.to_string(),
                    })?;
                    rendered.push_str(value);
                }
            }
        }
        Ok(rendered)
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Slot(&'a str),
}

/// Splits template text into literal runs and slots
struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let rest = self.rest;
        let Some(pos) = rest.find(['{', '}']) else {
            self.rest = "";
            return Some(Segment::Literal(rest));
        };

        if pos > 0 {
            self.rest = &rest[pos..];
            return Some(Segment::Literal(&rest[..pos]));
        }

        if rest.starts_with("{{") || rest.starts_with("}}") {
            self.rest = &rest[2..];
            return Some(Segment::Literal(&rest[..1]));
        }

        if rest.starts_with('{') {
            if let Some(end) = rest.find('}') {
                let name = &rest[1..end];
                if is_slot_name(name) {
                    self.rest = &rest[end + 1..];
                    return Some(Segment::Slot(name));
                }
            }
        }

        // A lone brace that is neither an escape nor a slot stays literal
        self.rest = &rest[1..];
        Some(Segment::Literal(&rest[..1]))
    }
}

fn is_slot_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
