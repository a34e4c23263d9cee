//! Report Rendering
//!
//! Text and JSON renderings of a validation result for the CLI.

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::validation::ValidationResult;

/// Render a result in the requested format
pub fn render(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}

/// One `field: message` line per error, then `valid` or `invalid`
pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::new();
    for (field, messages) in result.errors.iter() {
        for message in messages {
            out.push_str(field);
            out.push_str(": ");
            out.push_str(message);
            out.push('\n');
        }
    }
    out.push_str(if result.valid { "valid" } else { "invalid" });
    out
}

pub fn render_json(result: &ValidationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize validation result")
}
