//! Parsed Rule Types
//!
//! Structured form of rule expressions. Pure data, no registry lookups.

use indexmap::IndexMap;
use serde::Serialize;

use crate::parser::lexer::{Token, TokenKind};

/// Field name to rule expression, as authored by the caller
pub type RuleExpressions = IndexMap<String, String>;

/// One validator invocation, e.g. `between:18,30`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedValidator {
    /// Registry name (e.g. "between")
    pub name: String,
    /// Raw string arguments (e.g. ["18", "30"])
    pub args: Vec<String>,
}

impl ParsedValidator {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Parsed validator chains for every field, in authoring order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    fields: IndexMap<String, Vec<ParsedValidator>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the chain for a field
    pub fn insert(&mut self, field: impl Into<String>, validators: Vec<ParsedValidator>) {
        self.fields.insert(field.into(), validators);
    }

    /// Validator chain for a field
    pub fn get(&self, field: &str) -> Option<&[ParsedValidator]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterate fields and their chains in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParsedValidator])> {
        self.fields
            .iter()
            .map(|(field, validators)| (field.as_str(), validators.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Group name/argument tokens into validators
///
/// Arguments that appear before any name are dropped; the lexer never
/// produces them.
pub fn tokens_to_validators(tokens: Vec<Token>) -> Vec<ParsedValidator> {
    let mut validators: Vec<ParsedValidator> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Name => validators.push(ParsedValidator::new(token.text, Vec::new())),
            TokenKind::Argument => {
                if let Some(current) = validators.last_mut() {
                    current.args.push(token.text);
                }
            }
        }
    }

    validators
}
