//! Validator Registry
//!
//! Immutable name to validator table handed to the evaluation engine.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::builtin;
use super::catalog::MessageCatalog;
use crate::core::{DataRecord, Value};
use crate::messages::format_message;

/// A named, pure check over one field value
///
/// `record` is the raw data record, for validators whose outcome depends on
/// other fields. `args` are the string arguments from the rule expression.
pub trait Validator: Send + Sync {
    fn check(&self, value: &Value, args: &[String], record: &DataRecord) -> bool;

    /// Named arguments available to message templates (e.g. `min`)
    fn placeholders(&self, _args: &[String], _record: &DataRecord) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Adapter registering a plain closure as a validator
pub struct FnValidator<F>(pub F);

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value, &[String], &DataRecord) -> bool + Send + Sync,
{
    fn check(&self, value: &Value, args: &[String], record: &DataRecord) -> bool {
        (self.0)(value, args, record)
    }
}

/// Result of invoking a validator on a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub pass: bool,
    template: String,
    params: Vec<(String, String)>,
}

impl Outcome {
    /// The validator's default message template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Named arguments of this invocation
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Placeholder bindings for a field: `field` first, then the params
    pub fn bindings<'a>(&'a self, field: &'a str) -> Vec<(&'a str, &'a str)> {
        std::iter::once(("field", field))
            .chain(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }

    /// Default message rendered for a field
    pub fn message(&self, field: &str) -> String {
        format_message(&self.template, &self.bindings(field))
    }
}

/// A validator together with its default message template
#[derive(Clone)]
pub struct RegisteredValidator {
    name: String,
    validator: Arc<dyn Validator>,
    message: String,
}

impl fmt::Debug for RegisteredValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl RegisteredValidator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_message(&self) -> &str {
        &self.message
    }

    /// Run the validator on an already normalized value
    pub fn invoke(&self, value: &Value, args: &[String], record: &DataRecord) -> Outcome {
        Outcome {
            pass: self.validator.check(value, args, record),
            template: self.message.clone(),
            params: self.validator.placeholders(args, record),
        }
    }
}

/// Name to validator table
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<String, RegisteredValidator>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins(&MessageCatalog::builtin())
    }
}

impl ValidatorRegistry {
    /// A registry with no validators at all
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// A registry holding every built-in validator, messages from `catalog`
    pub fn with_builtins(catalog: &MessageCatalog) -> Self {
        let mut registry = Self::new();
        builtin::register_builtins(&mut registry, catalog);
        registry
    }

    /// Register (or replace) a validator under a name
    pub fn register<V>(&mut self, name: &str, validator: V, message: impl Into<String>)
    where
        V: Validator + 'static,
    {
        self.validators.insert(
            name.to_string(),
            RegisteredValidator {
                name: name.to_string(),
                validator: Arc::new(validator),
                message: message.into(),
            },
        );
    }

    /// Register a closure as a validator
    pub fn register_fn<F>(&mut self, name: &str, message: impl Into<String>, check: F)
    where
        F: Fn(&Value, &[String], &DataRecord) -> bool + Send + Sync + 'static,
    {
        self.register(name, FnValidator(check), message);
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredValidator> {
        self.validators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
