//! Form and Data Files
//!
//! A form file is TOML with a `[rules]` table and an optional `[messages]`
//! table. Data files are JSON objects, or TOML tables when the path ends in
//! `.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::DataRecord;
use crate::messages::MessageOverrides;
use crate::parser::RuleExpressions;

/// Root form file structure (matches TOML)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFile {
    pub rules: RuleExpressions,
    #[serde(default)]
    pub messages: MessageOverrides,
}

/// Supported data file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
}

impl DataFormat {
    /// Pick the format from a file extension, JSON unless `.toml`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => DataFormat::Toml,
            _ => DataFormat::Json,
        }
    }
}

/// Parse form content from a TOML string
pub fn parse_form(content: &str, source_path: Option<&Path>) -> Result<FormFile> {
    toml::from_str(content).with_context(|| match source_path {
        Some(path) => format!("Failed to parse form TOML: {}", path.display()),
        None => "Failed to parse form TOML".to_string(),
    })
}

/// Read and parse a form file
pub fn load_form(path: &Path) -> Result<FormFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file: {}", path.display()))?;
    parse_form(&content, Some(path))
}

/// Parse a data record
pub fn parse_data(content: &str, format: DataFormat) -> Result<DataRecord> {
    match format {
        DataFormat::Json => serde_json::from_str(content).context("Failed to parse JSON data"),
        DataFormat::Toml => toml::from_str(content).context("Failed to parse TOML data"),
    }
}

/// Read and parse a data file
pub fn load_data(path: &Path) -> Result<DataRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    parse_data(&content, DataFormat::from_path(path))
        .with_context(|| format!("Invalid data file: {}", path.display()))
}
