//! Configuration management for formcheck.
//!
//! Handles:
//! - Command-line argument parsing
//! - Message catalog directory resolution

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Command-line arguments for formcheck
#[derive(Debug, Parser)]
#[command(name = "formcheck")]
#[command(about = "Validate form data against rule expressions")]
#[command(version)]
pub struct Args {
    /// Form file holding the rules and message overrides
    #[arg(long, help = "TOML file with [rules] and optional [messages]")]
    pub form: PathBuf,

    /// Data file to validate
    #[arg(long, help = "JSON (or .toml) file with field values")]
    pub data: PathBuf,

    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep running and re-validate when the form or data file changes
    #[arg(long)]
    pub watch: bool,

    /// Extra directory to search for messages.toml (highest priority)
    #[arg(long, help = "Directory containing a messages.toml catalog")]
    pub catalog_dir: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub form_path: PathBuf,
    pub data_path: PathBuf,
    pub format: OutputFormat,
    pub watch: bool,
    /// Catalog directories, lowest priority first
    pub catalog_dirs: Vec<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        if args.form == args.data {
            bail!(
                "--form and --data point at the same file: {}",
                args.form.display()
            );
        }

        let mut catalog_dirs = Vec::new();

        // User global directory: ~/.config/formcheck/
        if let Some(config_dir) = dirs::config_dir() {
            catalog_dirs.push(config_dir.join("formcheck"));
        }

        // Workspace directory: ./.formcheck/
        catalog_dirs.push(std::env::current_dir()?.join(".formcheck"));

        if let Some(custom_dir) = args.catalog_dir {
            catalog_dirs.push(custom_dir);
        }

        Ok(Config {
            form_path: args.form,
            data_path: args.data,
            format: args.format,
            watch: args.watch,
            catalog_dirs,
            log_level: args.log_level,
        })
    }
}
