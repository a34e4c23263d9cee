//! Validation Engine
//!
//! Evaluation of parsed rule sets against data records.

pub mod cache;
pub mod engine;

pub use cache::RuleSetCache;
pub use engine::{validate, Engine, Errors, ValidationResult};
