//! Input File Watching
//!
//! Re-validates a form whenever its form file or data file changes on disk.
//! Events from `notify` are forwarded over a tokio channel, coalesced, and
//! applied to the `FormValidator` one input at a time.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::form::{load_data, load_form, FormValidator};
use crate::validation::ValidationResult;

/// Editors often emit several events per save
const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Which input a file event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Form,
    Data,
}

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    InputChanged(Input),
    WatcherError(notify::Error),
}

/// Canonical paths of the watched inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedPaths {
    pub form: PathBuf,
    pub data: PathBuf,
}

impl WatchedPaths {
    /// Resolve both paths; the files must exist
    pub fn new(form: &Path, data: &Path) -> Result<Self> {
        Ok(Self {
            form: std::fs::canonicalize(form)
                .with_context(|| format!("Failed to resolve form file: {}", form.display()))?,
            data: std::fs::canonicalize(data)
                .with_context(|| format!("Failed to resolve data file: {}", data.display()))?,
        })
    }

    pub fn classify(&self, path: &Path) -> Option<Input> {
        if path == self.form {
            Some(Input::Form)
        } else if path == self.data {
            Some(Input::Data)
        } else {
            None
        }
    }

    /// Distinct parent directories to watch
    fn directories(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = [&self.form, &self.data]
            .into_iter()
            .filter_map(|path| path.parent())
            .collect();
        dirs.dedup();
        dirs
    }
}

/// Reload one input from disk and push it into the form
///
/// Rules keep their `Arc` when the rule table is unchanged so that only a
/// real rule edit re-parses.
pub fn apply_change(form: &mut FormValidator, input: Input, paths: &WatchedPaths) -> Result<()> {
    match input {
        Input::Form => {
            let file = load_form(&paths.form)?;
            // IndexMap == ignores order
            if !form.rules().iter().eq(file.rules.iter()) {
                form.set_rules(Arc::new(file.rules))?;
            }
            if *form.messages() != file.messages {
                form.set_messages(file.messages)?;
            }
        }
        Input::Data => form.set_data(load_data(&paths.data)?)?,
    }
    Ok(())
}

/// Watch the inputs until Ctrl-C, calling `on_result` after every pass
///
/// `on_result` is called once up front with the current result. A change
/// that fails to load or evaluate is logged and the previous state kept.
pub async fn watch<F>(mut form: FormValidator, paths: WatchedPaths, mut on_result: F) -> Result<()>
where
    F: FnMut(&ValidationResult),
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let classifier = paths.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                    for path in event.paths {
                        if let Some(input) = classifier.classify(&path) {
                            let _ = tx.send(WatcherEvent::InputChanged(input));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatcherEvent::WatcherError(e));
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    for dir in paths.directories() {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", dir.display()))?;
    }

    log::info!(
        "Watching {} and {}",
        paths.form.display(),
        paths.data.display()
    );
    on_result(form.result());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };

                let mut changed = Vec::new();
                collect(event, &mut changed);
                tokio::time::sleep(SETTLE_DELAY).await;
                while let Ok(event) = rx.try_recv() {
                    collect(event, &mut changed);
                }

                if changed.is_empty() {
                    continue;
                }
                for input in changed {
                    log::info!("{:?} file changed, re-validating", input);
                    if let Err(e) = apply_change(&mut form, input, &paths) {
                        log::error!("Keeping previous state: {:#}", e);
                    }
                }
                on_result(form.result());
            }
            _ = &mut ctrl_c => {
                log::info!("Stopping watch");
                break;
            }
        }
    }

    Ok(())
}

fn collect(event: WatcherEvent, changed: &mut Vec<Input>) {
    match event {
        WatcherEvent::InputChanged(input) => {
            if !changed.contains(&input) {
                changed.push(input);
            }
        }
        WatcherEvent::WatcherError(e) => log::error!("File watcher error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageOverrides;
    use crate::validation::Engine;
    use std::fs;

    fn setup() -> (tempfile::TempDir, WatchedPaths) {
        let dir = tempfile::tempdir().expect("temp dir");
        let form = dir.path().join("form.toml");
        let data = dir.path().join("data.json");
        fs::write(&form, "[rules]\nname = \"required\"\n").expect("write form");
        fs::write(&data, "{}").expect("write data");
        let paths = WatchedPaths::new(&form, &data).expect("paths");
        (dir, paths)
    }

    fn form_for(paths: &WatchedPaths) -> FormValidator {
        let file = load_form(&paths.form).expect("load form");
        FormValidator::new(
            Engine::default(),
            Arc::new(file.rules),
            load_data(&paths.data).expect("load data"),
            MessageOverrides::new(),
        )
        .expect("form")
    }

    #[test]
    fn test_classify() {
        let (_dir, paths) = setup();
        assert_eq!(paths.classify(&paths.form), Some(Input::Form));
        assert_eq!(paths.classify(&paths.data), Some(Input::Data));
        assert_eq!(paths.classify(Path::new("/elsewhere.json")), None);
        assert_eq!(paths.directories().len(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(WatchedPaths::new(&missing, &missing).is_err());
    }

    #[test]
    fn test_apply_data_change() {
        let (_dir, paths) = setup();
        let mut form = form_for(&paths);
        assert!(!form.valid());

        fs::write(&paths.data, r#"{"name": "John"}"#).expect("write data");
        apply_change(&mut form, Input::Data, &paths).expect("apply");
        assert!(form.valid());
    }

    #[test]
    fn test_unchanged_rules_are_not_reparsed() {
        let (_dir, paths) = setup();
        let mut form = form_for(&paths);

        fs::write(
            &paths.form,
            "[rules]\nname = \"required\"\n\n[messages]\nrequired = \"Needed\"\n",
        )
        .expect("write form");
        apply_change(&mut form, Input::Form, &paths).expect("apply");

        assert_eq!(form.parse_count(), 1);
        assert_eq!(form.errors().first("name"), Some("Needed"));
    }

    #[test]
    fn test_reordered_rules_are_reparsed() {
        let (_dir, paths) = setup();
        fs::write(&paths.form, "[rules]\nname = \"required\"\nage = \"required\"\n")
            .expect("write form");
        let mut form = form_for(&paths);
        assert_eq!(form.errors().all(), ["name is required", "age is required"]);

        fs::write(&paths.form, "[rules]\nage = \"required\"\nname = \"required\"\n")
            .expect("write form");
        apply_change(&mut form, Input::Form, &paths).expect("apply");

        assert_eq!(form.parse_count(), 2);
        assert_eq!(form.errors().all(), ["age is required", "name is required"]);
    }

    #[test]
    fn test_broken_form_keeps_state() {
        let (_dir, paths) = setup();
        let mut form = form_for(&paths);

        fs::write(&paths.form, "[rules\n").expect("write form");
        assert!(apply_change(&mut form, Input::Form, &paths).is_err());
        assert_eq!(form.errors().first("name"), Some("name is required"));
    }
}
