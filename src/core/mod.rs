//! Core Types
//!
//! Field values, records and engine errors shared by every other module.

pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::{record, DataRecord, Value};
