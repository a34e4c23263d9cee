//! Validator Registry
//!
//! Built-in validators, the message catalog they draw default templates
//! from, and the name-keyed table the engine dispatches through.

pub mod builtin;
pub mod catalog;
pub mod validator;

pub use catalog::{CatalogFile, MessageCatalog};
pub use validator::{FnValidator, Outcome, RegisteredValidator, Validator, ValidatorRegistry};
