//! Form Validator
//!
//! A declarative validation engine for flat records of named fields.
//!
//! This library provides:
//! - A parser for pipe-delimited rule expressions (`required|between:18,30`)
//! - A registry of named validators, open for extension
//! - Layered message overrides with placeholder substitution
//! - An evaluation engine aggregating every failure per field
//! - A stateful form binding and file watching for the `formcheck` CLI

pub mod config;
pub mod core;
pub mod form;
pub mod messages;
pub mod parser;
pub mod registry;
pub mod report;
pub mod validation;
pub mod watch;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{DataRecord, Error, Value};
pub use form::FormValidator;
pub use messages::{MessageOverride, MessageOverrides};
pub use parser::{parse, parse_rules, ParsedValidator, RuleExpressions, RuleSet};
pub use registry::{MessageCatalog, Validator, ValidatorRegistry};
pub use validation::{validate, Engine, Errors, ValidationResult};
