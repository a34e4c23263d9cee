//! Engine Errors
//!
//! Configuration problems surfaced while evaluating a rule set. Business-rule
//! failures never show up here; they are entries in a `ValidationResult`.

use thiserror::Error;

/// Errors raised by the evaluation engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A rule names a validator that is not in the registry
    #[error("unknown validator '{validator}' in rules for field '{field}'")]
    UnknownValidator { field: String, validator: String },
}

pub type Result<T> = std::result::Result<T, Error>;
