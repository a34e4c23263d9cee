//! Form Binding
//!
//! Owns the three inputs of a form (rules, data, message overrides) and
//! re-evaluates synchronously whenever one of them changes.

use std::sync::Arc;

use crate::core::{DataRecord, Result, Value};
use crate::messages::MessageOverrides;
use crate::parser::RuleExpressions;
use crate::validation::{Engine, Errors, RuleSetCache, ValidationResult};

/// A validated form
///
/// Every setter runs a full pass and replaces the stored result. When a pass
/// fails with a configuration error the setter returns it and the form keeps
/// its previous inputs and result.
#[derive(Debug)]
pub struct FormValidator {
    engine: Engine,
    cache: RuleSetCache,
    rules: Arc<RuleExpressions>,
    data: DataRecord,
    messages: MessageOverrides,
    result: ValidationResult,
}

impl FormValidator {
    pub fn new(
        engine: Engine,
        rules: Arc<RuleExpressions>,
        data: DataRecord,
        messages: MessageOverrides,
    ) -> Result<Self> {
        let mut cache = RuleSetCache::new();
        let result = evaluate_form(&engine, &mut cache, &rules, &data, &messages)?;

        Ok(Self {
            engine,
            cache,
            rules,
            data,
            messages,
            result,
        })
    }

    /// Replace the rule map; re-parses only if `rules` is a different `Arc`
    pub fn set_rules(&mut self, rules: Arc<RuleExpressions>) -> Result<()> {
        let result = evaluate_form(
            &self.engine,
            &mut self.cache,
            &rules,
            &self.data,
            &self.messages,
        )?;
        self.rules = rules;
        self.result = result;
        Ok(())
    }

    pub fn set_data(&mut self, data: DataRecord) -> Result<()> {
        let result = evaluate_form(
            &self.engine,
            &mut self.cache,
            &self.rules,
            &data,
            &self.messages,
        )?;
        self.data = data;
        self.result = result;
        Ok(())
    }

    /// Change one field's value
    pub fn set_value(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let mut data = self.data.clone();
        data.insert(field.to_string(), value.into());
        self.set_data(data)
    }

    pub fn set_messages(&mut self, messages: MessageOverrides) -> Result<()> {
        let result = evaluate_form(
            &self.engine,
            &mut self.cache,
            &self.rules,
            &self.data,
            &messages,
        )?;
        self.messages = messages;
        self.result = result;
        Ok(())
    }

    pub fn valid(&self) -> bool {
        self.result.valid
    }

    pub fn errors(&self) -> &Errors {
        &self.result.errors
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn data(&self) -> &DataRecord {
        &self.data
    }

    pub fn rules(&self) -> &Arc<RuleExpressions> {
        &self.rules
    }

    pub fn messages(&self) -> &MessageOverrides {
        &self.messages
    }

    /// How many times the rules have been parsed
    pub fn parse_count(&self) -> usize {
        self.cache.parse_count()
    }
}

fn evaluate_form(
    engine: &Engine,
    cache: &mut RuleSetCache,
    rules: &Arc<RuleExpressions>,
    data: &DataRecord,
    messages: &MessageOverrides,
) -> Result<ValidationResult> {
    let rule_set = cache.get(rules);
    engine.evaluate(data, &rule_set, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record;

    fn rules(pairs: &[(&str, &str)]) -> Arc<RuleExpressions> {
        Arc::new(
            pairs
                .iter()
                .map(|(field, rule)| (field.to_string(), rule.to_string()))
                .collect(),
        )
    }

    fn form(pairs: &[(&str, &str)]) -> FormValidator {
        FormValidator::new(
            Engine::default(),
            rules(pairs),
            DataRecord::new(),
            MessageOverrides::new(),
        )
        .expect("create form")
    }

    #[test]
    fn test_fixing_a_value_clears_stale_errors() {
        let mut form = form(&[("name", "required|min:3")]);
        assert!(!form.valid());
        assert_eq!(form.errors().get("name").len(), 2);

        form.set_value("name", "Jo").expect("set value");
        assert_eq!(
            form.errors().get("name"),
            ["name must be at least 3 characters"]
        );

        form.set_value("name", "John").expect("set value");
        assert!(form.valid());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_data_changes_do_not_reparse() {
        let mut form = form(&[("name", "required")]);
        form.set_value("name", "a").expect("set value");
        form.set_data(record([("name", "b")])).expect("set data");

        assert_eq!(form.parse_count(), 1);
    }

    #[test]
    fn test_new_rules_reparse() {
        let mut form = form(&[("name", "required")]);
        form.set_value("name", "John").expect("set value");
        assert!(form.valid());

        form.set_rules(rules(&[("name", "required|max:3")]))
            .expect("set rules");
        assert_eq!(form.parse_count(), 2);
        assert!(!form.valid());
    }

    #[test]
    fn test_set_messages() {
        let mut form = form(&[("name", "required")]);
        let mut messages = MessageOverrides::new();
        messages.insert(
            "required".to_string(),
            crate::messages::MessageOverride::text("Needed"),
        );

        form.set_messages(messages).expect("set messages");
        assert_eq!(form.errors().first("name"), Some("Needed"));
    }

    #[test]
    fn test_bad_rules_keep_previous_state() {
        let mut form = form(&[("name", "required")]);
        let before = form.result().clone();

        assert!(form.set_rules(rules(&[("name", "nope")])).is_err());
        assert_eq!(form.result(), &before);
        assert_eq!(form.rules().get("name").map(String::as_str), Some("required"));
    }
}
