//! Error Messages
//!
//! Override lookup and placeholder substitution for validator messages.

pub mod resolver;

pub use resolver::{format_message, lookup_override, resolve, MessageOverride, MessageOverrides};
