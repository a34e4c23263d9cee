//! Built-in Validators
//!
//! `required`, `min`, `max`, `between`, `email`, `uuid` and the dependent
//! `required_if` / `required_with`.

use regex::Regex;
use std::sync::LazyLock;

use super::catalog::MessageCatalog;
use super::validator::{Validator, ValidatorRegistry};
use crate::core::{DataRecord, Value};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:[^<>()\[\].,;:\s@"]+(?:\.[^<>()\[\].,;:\s@"]+)*|".+")@(?:[^<>()\[\].,;:\s@"]+\.)+[^<>()\[\].,;:\s@"]{2,}$"#,
    )
    .expect("email pattern is valid")
});

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

// Longest numeric prefix, the way a lenient float parse reads "18px" as 18
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// Register every built-in validator, taking templates from `catalog`
pub fn register_builtins(registry: &mut ValidatorRegistry, catalog: &MessageCatalog) {
    registry.register("required", Required, catalog.template("required"));
    registry.register("min", Min, catalog.template("min"));
    registry.register("max", Max, catalog.template("max"));
    registry.register("between", Between, catalog.template("between"));
    registry.register("email", Email, catalog.template("email"));
    registry.register("uuid", Uuid, catalog.template("uuid"));
    registry.register("required_if", RequiredIf, catalog.template("required_if"));
    registry.register("required_with", RequiredWith, catalog.template("required_with"));
}

/// Parse a numeric rule argument; unparseable or absent arguments are NaN
pub fn numeric_arg(args: &[String], index: usize) -> f64 {
    args.get(index)
        .and_then(|arg| NUMERIC_PREFIX.find(arg))
        .and_then(|m| m.as_str().trim().parse().ok())
        .unwrap_or(f64::NAN)
}

fn named(names: &[&str], args: &[String]) -> Vec<(String, String)> {
    names
        .iter()
        .zip(args)
        .map(|(name, arg)| (name.to_string(), arg.clone()))
        .collect()
}

/// Non-empty value
#[derive(Debug, Clone, Copy)]
pub struct Required;

impl Validator for Required {
    fn check(&self, value: &Value, _args: &[String], _record: &DataRecord) -> bool {
        value.length() > 0.0
    }
}

/// `min:<n>`
#[derive(Debug, Clone, Copy)]
pub struct Min;

impl Validator for Min {
    fn check(&self, value: &Value, args: &[String], _record: &DataRecord) -> bool {
        value.length() >= numeric_arg(args, 0)
    }

    fn placeholders(&self, args: &[String], _record: &DataRecord) -> Vec<(String, String)> {
        named(&["min"], args)
    }
}

/// `max:<n>`
#[derive(Debug, Clone, Copy)]
pub struct Max;

impl Validator for Max {
    fn check(&self, value: &Value, args: &[String], _record: &DataRecord) -> bool {
        value.length() <= numeric_arg(args, 0)
    }

    fn placeholders(&self, args: &[String], _record: &DataRecord) -> Vec<(String, String)> {
        named(&["max"], args)
    }
}

/// `between:<min>,<max>`, both bounds inclusive
#[derive(Debug, Clone, Copy)]
pub struct Between;

impl Validator for Between {
    fn check(&self, value: &Value, args: &[String], _record: &DataRecord) -> bool {
        let length = value.length();
        length >= numeric_arg(args, 0) && length <= numeric_arg(args, 1)
    }

    fn placeholders(&self, args: &[String], _record: &DataRecord) -> Vec<(String, String)> {
        named(&["min", "max"], args)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Email;

impl Validator for Email {
    fn check(&self, value: &Value, _args: &[String], _record: &DataRecord) -> bool {
        EMAIL_PATTERN.is_match(&value.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Uuid;

impl Validator for Uuid {
    fn check(&self, value: &Value, _args: &[String], _record: &DataRecord) -> bool {
        UUID_PATTERN.is_match(&value.to_string())
    }
}

/// `required_if:<field>,<value>,...`
///
/// Required when the last listed field present in the record equals its
/// paired value. A later present pair overrides an earlier one.
#[derive(Debug, Clone, Copy)]
pub struct RequiredIf;

impl Validator for RequiredIf {
    fn check(&self, value: &Value, args: &[String], record: &DataRecord) -> bool {
        let should_validate = RequiredIf::deciding_pair(args, record).is_some_and(|pair| {
            record
                .get(&pair[0])
                .zip(pair.get(1))
                .is_some_and(|(current, expected)| current.matches_literal(expected))
        });

        !should_validate || Required.check(value, &[], record)
    }

    /// `other`/`value` name the pair that decided the outcome, or the first
    /// pair when no listed field is present
    fn placeholders(&self, args: &[String], record: &DataRecord) -> Vec<(String, String)> {
        match RequiredIf::deciding_pair(args, record) {
            Some(pair) => named(&["other", "value"], pair),
            None => named(&["other", "value"], args),
        }
    }
}

impl RequiredIf {
    /// Last `(field, value)` pair whose field is present in the record
    fn deciding_pair<'a>(args: &'a [String], record: &DataRecord) -> Option<&'a [String]> {
        args.chunks(2)
            .rev()
            .find(|pair| record.contains_key(&pair[0]))
    }
}

/// `required_with:<field>,...`
///
/// Required when any listed field is non-empty.
#[derive(Debug, Clone, Copy)]
pub struct RequiredWith;

impl Validator for RequiredWith {
    fn check(&self, value: &Value, args: &[String], record: &DataRecord) -> bool {
        let triggered = args
            .iter()
            .any(|field| record.get(field).is_some_and(|other| !other.is_blank()));

        !triggered || Required.check(value, &[], record)
    }

    fn placeholders(&self, args: &[String], _record: &DataRecord) -> Vec<(String, String)> {
        if args.is_empty() {
            return Vec::new();
        }
        vec![("values".to_string(), args.join(", "))]
    }
}
