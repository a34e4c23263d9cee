use std::sync::Arc;

use anyhow::{Context, Result};

use form_validator::config::{Config, OutputFormat};
use form_validator::form::{load_data, load_form, FormValidator};
use form_validator::registry::{MessageCatalog, ValidatorRegistry};
use form_validator::report;
use form_validator::validation::{Engine, ValidationResult};
use form_validator::watch::{self, WatchedPaths};

fn print_report(result: &ValidationResult, format: OutputFormat) {
    match report::render(result, format) {
        Ok(text) => println!("{}", text),
        Err(e) => log::error!("{:#}", e),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .parse_default_env()
        .init();

    let catalog = MessageCatalog::load(&config.catalog_dirs);
    let engine = Engine::new(Arc::new(ValidatorRegistry::with_builtins(&catalog)));

    let form_file = load_form(&config.form_path)?;
    let data = load_data(&config.data_path)?;

    let form = FormValidator::new(engine, Arc::new(form_file.rules), data, form_file.messages)
        .with_context(|| format!("Invalid rules in {}", config.form_path.display()))?;

    if config.watch {
        let paths = WatchedPaths::new(&config.form_path, &config.data_path)?;
        let format = config.format;
        return watch::watch(form, paths, |result| print_report(result, format)).await;
    }

    print_report(form.result(), config.format);
    if !form.valid() {
        std::process::exit(1);
    }

    Ok(())
}
