//! Evaluation Engine
//!
//! Runs every field's validator chain and collects failure messages.

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

use crate::core::{DataRecord, Error, Result, Value};
use crate::messages::{self, MessageOverrides};
use crate::parser::{self, RuleExpressions, RuleSet};
use crate::registry::{RegisteredValidator, ValidatorRegistry};

/// Error messages per field, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Errors {
    by_field: IndexMap<String, Vec<String>>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message, field order first, then rule order
    pub fn all(&self) -> Vec<&str> {
        self.by_field
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }

    /// Messages for a field; empty when the field passed
    pub fn get(&self, field: &str) -> &[String] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.by_field.contains_key(field)
    }

    /// Fields with at least one message
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }

    /// `(field, messages)` pairs in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_field
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Total number of messages
    pub fn count(&self) -> usize {
        self.by_field.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn add(&mut self, field: &str, message: String) {
        self.by_field
            .entry(field.to_string())
            .or_default()
            .push(message);
    }
}

/// Result of one evaluation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Errors,
}

impl ValidationResult {
    pub fn from_errors(errors: Errors) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Evaluates rule sets against data through a validator registry
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<ValidatorRegistry>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(ValidatorRegistry::default()))
    }
}

impl Engine {
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Confirm every validator named in `rules` is registered
    pub fn check_rules(&self, rules: &RuleSet) -> Result<()> {
        for (field, validators) in rules.iter() {
            for parsed in validators {
                self.lookup(field, &parsed.name)?;
            }
        }
        Ok(())
    }

    /// Run one full evaluation pass
    ///
    /// Every validator of every field runs, in rule-set order; a field can
    /// collect several messages. Fields missing from `data` are validated
    /// as the empty string. An unregistered validator name aborts the pass.
    pub fn evaluate(
        &self,
        data: &DataRecord,
        rules: &RuleSet,
        overrides: &MessageOverrides,
    ) -> Result<ValidationResult> {
        let mut errors = Errors::new();

        for (field, validators) in rules.iter() {
            let value = Value::normalize(data.get(field));

            for parsed in validators {
                let validator = self.lookup(field, &parsed.name)?;
                let outcome = validator.invoke(&value, &parsed.args, data);
                if outcome.pass {
                    continue;
                }

                log::trace!("{} failed '{}' with value {:?}", field, parsed.name, value);
                errors.add(
                    field,
                    messages::resolve(field, &parsed.name, &outcome, overrides),
                );
            }
        }

        let result = ValidationResult::from_errors(errors);
        log::debug!(
            "Evaluated {} fields: {} messages across {} fields",
            rules.len(),
            result.errors.count(),
            result.errors.by_field.len()
        );

        Ok(result)
    }

    fn lookup(&self, field: &str, name: &str) -> Result<&RegisteredValidator> {
        self.registry
            .lookup(name)
            .ok_or_else(|| Error::UnknownValidator {
                field: field.to_string(),
                validator: name.to_string(),
            })
    }
}

/// Parse `rules` and evaluate them once with the built-in validators
pub fn validate(
    rules: &RuleExpressions,
    data: &DataRecord,
    overrides: &MessageOverrides,
) -> Result<ValidationResult> {
    Engine::default().evaluate(data, &parser::parse_rules(rules), overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record;

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        let expressions: RuleExpressions = pairs
            .iter()
            .map(|(field, rule)| (field.to_string(), rule.to_string()))
            .collect();
        parser::parse_rules(&expressions)
    }

    #[test]
    fn test_errors_accessors() {
        let mut errors = Errors::new();
        assert!(errors.is_empty());

        errors.add("name", "a".to_string());
        errors.add("age", "b".to_string());
        errors.add("name", "c".to_string());

        assert_eq!(errors.all(), ["a", "c", "b"]);
        assert_eq!(errors.get("name"), ["a", "c"]);
        assert!(errors.get("email").is_empty());
        assert_eq!(errors.first("age"), Some("b"));
        assert_eq!(errors.first("email"), None);
        assert_eq!(errors.count(), 3);
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["name", "age"]);
    }

    #[test]
    fn test_validation_result_validity() {
        assert!(ValidationResult::from_errors(Errors::new()).is_valid());

        let mut errors = Errors::new();
        errors.add("name", "required".to_string());
        assert!(!ValidationResult::from_errors(errors).is_valid());
    }

    #[test]
    fn test_missing_field_is_empty_string() {
        let engine = Engine::default();
        let result = engine
            .evaluate(
                &DataRecord::new(),
                &rules(&[("age", "required|between:18,30")]),
                &MessageOverrides::new(),
            )
            .expect("evaluate");

        assert!(!result.valid);
        assert_eq!(result.errors.first("age"), Some("age is required"));
        // "" has length 0, outside 18..=30
        assert_eq!(result.errors.get("age").len(), 2);
    }

    #[test]
    fn test_values_are_trimmed() {
        let engine = Engine::default();
        let result = engine
            .evaluate(
                &record([("name", "   ")]),
                &rules(&[("name", "required")]),
                &MessageOverrides::new(),
            )
            .expect("evaluate");

        assert_eq!(result.errors.get("name"), ["name is required"]);
    }

    #[test]
    fn test_passing_field_is_absent() {
        let engine = Engine::default();
        let result = engine
            .evaluate(
                &record([("name", "John")]),
                &rules(&[("name", "required|max:255"), ("age", "required")]),
                &MessageOverrides::new(),
            )
            .expect("evaluate");

        assert!(!result.errors.has("name"));
        assert!(result.errors.has("age"));
    }

    #[test]
    fn test_unknown_validator_is_an_error() {
        let engine = Engine::default();
        let rule_set = rules(&[("name", "required"), ("code", "required|slug")]);

        let expected = Error::UnknownValidator {
            field: "code".to_string(),
            validator: "slug".to_string(),
        };
        assert_eq!(engine.check_rules(&rule_set), Err(expected.clone()));
        assert_eq!(
            engine.evaluate(&DataRecord::new(), &rule_set, &MessageOverrides::new()),
            Err(expected)
        );
    }

    #[test]
    fn test_empty_segment_is_unknown() {
        let engine = Engine::default();
        let err = engine.check_rules(&rules(&[("name", "required||max:3")])).unwrap_err();
        assert_eq!(err.to_string(), "unknown validator '' in rules for field 'name'");
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = ValidatorRegistry::new();
        registry.register_fn("yes", ":field must be yes", |value, _, _| {
            value.matches_literal("yes")
        });
        let engine = Engine::new(Arc::new(registry));

        let result = engine
            .evaluate(
                &record([("agree", "no")]),
                &rules(&[("agree", "yes")]),
                &MessageOverrides::new(),
            )
            .expect("evaluate");
        assert_eq!(result.errors.all(), ["agree must be yes"]);

        // built-ins are not implied
        assert!(engine.check_rules(&rules(&[("agree", "required")])).is_err());
    }

    #[test]
    fn test_validate_shortcut() {
        let mut expressions = RuleExpressions::new();
        expressions.insert("email".to_string(), "required|email".to_string());

        let result = validate(
            &expressions,
            &record([("email", "email@john.com")]),
            &MessageOverrides::new(),
        )
        .expect("validate");
        assert!(result.valid);
    }
}
