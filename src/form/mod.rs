//! Form Binding
//!
//! The stateful wrapper callers drive on every input change, and loaders
//! for the files the CLI reads forms and data from.

pub mod binding;
pub mod file;

pub use binding::FormValidator;
pub use file::{load_data, load_form, parse_data, parse_form, DataFormat, FormFile};
