//! Message Catalog
//!
//! Default message templates per validator name. The built-in catalog is
//! embedded TOML; user-global and workspace `messages.toml` files are
//! layered on top of it, later layers winning per key.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File name looked up in every catalog directory
pub const CATALOG_FILE_NAME: &str = "messages.toml";

/// Template used when a validator has no catalog entry
pub const FALLBACK_TEMPLATE: &str = ":field is invalid";

/// Root catalog file structure (matches TOML)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogFile {
    pub catalog: Option<CatalogMeta>,
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

/// Catalog metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogMeta {
    pub name: String,
    pub description: Option<String>,
}

/// Merged validator name to template lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// An empty catalog; every lookup falls back to `FALLBACK_TEMPLATE`
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog embedded in the binary
    pub fn builtin() -> Self {
        let embedded_toml = include_str!("../../resources/messages/default.toml");

        let mut catalog = Self::empty();
        match parse_catalog(embedded_toml, None) {
            Ok(file) => catalog.merge(file),
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded message catalog: {:#}. Using minimal fallback.",
                    e
                );
                catalog.add_minimal_templates();
            }
        }
        catalog
    }

    /// Built-in catalog overlaid with every `messages.toml` found in `dirs`
    ///
    /// Directories are given lowest priority first. Missing directories are
    /// skipped; unreadable or malformed files are logged and skipped.
    pub fn load(dirs: &[PathBuf]) -> Self {
        let mut catalog = Self::builtin();

        for dir in dirs {
            let path = dir.join(CATALOG_FILE_NAME);
            if !path.exists() {
                continue;
            }
            match load_catalog_file(&path) {
                Ok(file) => {
                    log::debug!(
                        "Loaded {} message templates from {}",
                        file.messages.len(),
                        path.display()
                    );
                    catalog.merge(file);
                }
                Err(e) => log::warn!("Skipping message catalog: {:#}", e),
            }
        }

        catalog
    }

    /// Overlay a catalog file, replacing existing templates per key
    pub fn merge(&mut self, file: CatalogFile) {
        self.templates.extend(file.messages);
    }

    /// Set a single template
    pub fn set(&mut self, validator: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(validator.into(), template.into());
    }

    /// Template for a validator, or `FALLBACK_TEMPLATE`
    pub fn template(&self, validator: &str) -> &str {
        self.templates
            .get(validator)
            .map(String::as_str)
            .unwrap_or(FALLBACK_TEMPLATE)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn add_minimal_templates(&mut self) {
        self.set("required", ":field is required");
        self.set("min", ":field must be at least :min");
        self.set("max", ":field must be at most :max");
        self.set("between", ":field must be between :min and :max");
    }
}

/// Parse catalog content from a TOML string
pub fn parse_catalog(content: &str, source_path: Option<&Path>) -> Result<CatalogFile> {
    toml::from_str(content).with_context(|| match source_path {
        Some(path) => format!("Failed to parse message catalog TOML: {}", path.display()),
        None => "Failed to parse built-in message catalog TOML".to_string(),
    })
}

/// Read and parse a single catalog file
pub fn load_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read message catalog: {}", path.display()))?;
    parse_catalog(&content, Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.template("required"), ":field is required");
        assert_eq!(catalog.template("max"), ":field must be at most :max characters");
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn test_fallback_template() {
        let catalog = MessageCatalog::empty();
        assert_eq!(catalog.template("anything"), FALLBACK_TEMPLATE);
    }

    #[test]
    fn test_parse_catalog() {
        let file = parse_catalog(
            r#"
[catalog]
name = "terse"

[messages]
required = "needed"
"#,
            None,
        )
        .expect("parse catalog");

        assert_eq!(file.catalog.map(|meta| meta.name), Some("terse".to_string()));
        assert_eq!(file.messages.get("required").map(String::as_str), Some("needed"));
    }

    #[test]
    fn test_parse_catalog_error_has_context() {
        let err = parse_catalog("messages = 3", None).unwrap_err();
        assert!(format!("{:#}", err).contains("built-in message catalog"));
    }

    #[test]
    fn test_merge_overrides_per_key() {
        let mut catalog = MessageCatalog::builtin();
        let mut messages = HashMap::new();
        messages.insert("required".to_string(), "Fill in :field".to_string());
        catalog.merge(CatalogFile {
            catalog: None,
            messages,
        });

        assert_eq!(catalog.template("required"), "Fill in :field");
        assert_eq!(catalog.template("email"), ":field must be a valid email address");
    }
}
