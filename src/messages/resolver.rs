//! Message Resolver
//!
//! Chooses the message text for a failed validator and fills in its
//! placeholders.

use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::registry::Outcome;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern is valid")
});

/// Caller-supplied message text, keyed by validator name or field name
pub type MessageOverrides = IndexMap<String, MessageOverride>;

/// One level-1 entry of `MessageOverrides`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageOverride {
    /// Keyed by validator name, applies to every field
    Text(String),
    /// Keyed by field name, validator name to text
    Field(IndexMap<String, String>),
}

impl MessageOverride {
    pub fn text(message: impl Into<String>) -> Self {
        MessageOverride::Text(message.into())
    }

    /// Per-field overrides from `(validator, message)` pairs
    pub fn field<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        MessageOverride::Field(
            pairs
                .into_iter()
                .map(|(validator, message)| (validator.to_string(), message.to_string()))
                .collect(),
        )
    }
}

/// Find an override, most specific first
///
/// A field-specific entry for this validator wins over a global entry for
/// the validator name.
pub fn lookup_override<'a>(
    field: &str,
    validator: &str,
    overrides: &'a MessageOverrides,
) -> Option<&'a str> {
    if let Some(MessageOverride::Field(per_field)) = overrides.get(field) {
        if let Some(message) = per_field.get(validator) {
            return Some(message.as_str());
        }
    }

    match overrides.get(validator) {
        Some(MessageOverride::Text(message)) => Some(message.as_str()),
        _ => None,
    }
}

/// Final message for a failed validator on a field
pub fn resolve(
    field: &str,
    validator: &str,
    outcome: &Outcome,
    overrides: &MessageOverrides,
) -> String {
    let template = lookup_override(field, validator, overrides).unwrap_or(outcome.template());
    format_message(template, &outcome.bindings(field))
}

/// Replace `:name` tokens with their bound values
///
/// Single pass, case-sensitive. Tokens without a binding are left as they
/// are, and substituted text is never scanned again.
pub fn format_message(template: &str, bindings: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let token = &caps[1];
            match bindings.iter().find(|(name, _)| *name == token) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
