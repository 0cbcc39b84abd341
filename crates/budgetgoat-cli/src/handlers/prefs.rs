use crate::args::PrefsCommand;
use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use budgetgoat_diagnostics::DiagnosticsLogger;
use budgetgoat_store::{FileBackend, Setting, StorageBackend};
use budgetgoat_types::keys;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

// The prefs surface drives the storage accessor end-to-end: every read
// recovers to a default, every failed write stays optimistic, and
// failures show up as warning diagnostics instead of command errors.

fn backend(data_dir: &Path) -> Arc<dyn StorageBackend> {
    Arc::new(FileBackend::new(data_dir.join("prefs")))
}

pub fn handle(
    data_dir: &Path,
    logger: &DiagnosticsLogger,
    command: PrefsCommand,
    format: &OutputFormat,
) -> Result<()> {
    let backend = backend(data_dir);

    match command {
        PrefsCommand::Get { key } => {
            let mut setting = Setting::new(backend, key.clone(), Value::Null);
            setting.load();
            warn_on_error(logger, &key, setting.error());

            if format.is_json() {
                output::print_json(setting.value())
            } else {
                println!("{}", render(setting.value()));
                Ok(())
            }
        }

        PrefsCommand::Set { key, value } => {
            if !keys::ALL_KEYS.contains(&key.as_str()) {
                logger.log_warning(
                    "Prefs",
                    format!("'{}' is not a registered preference key", key),
                    None,
                );
            }

            // A JSON literal is stored as-is; anything else becomes a string.
            let parsed: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value.clone()));

            let mut setting = Setting::new(backend, key.clone(), Value::Null);
            warn_on_error(logger, &key, setting.save(parsed).as_deref());

            if format.is_json() {
                output::print_json(setting.value())
            } else {
                println!("{} = {}", key, render(setting.value()));
                Ok(())
            }
        }

        PrefsCommand::Unset { key } => {
            let mut setting = Setting::new(backend, key.clone(), Value::Null);
            warn_on_error(logger, &key, setting.clear().as_deref());

            if format.is_json() {
                output::print_json(setting.value())
            } else {
                println!("Cleared {}", key);
                Ok(())
            }
        }

        PrefsCommand::List => {
            let mut values = BTreeMap::new();
            for key in keys::ALL_KEYS {
                let mut setting = Setting::new(backend.clone(), key, Value::Null);
                setting.load();
                warn_on_error(logger, key, setting.error());
                values.insert(key, setting.value().clone());
            }

            if format.is_json() {
                output::print_json(&values)
            } else {
                for (key, value) in &values {
                    println!("{} = {}", key, render(value));
                }
                Ok(())
            }
        }
    }
}

fn warn_on_error(logger: &DiagnosticsLogger, key: &str, error: Option<&str>) {
    if let Some(error) = error {
        logger.log_warning(
            "Prefs",
            format!("preference '{}' degraded: {}", key, error),
            None,
        );
    }
}

/// Plain rendering: bare strings unquoted, everything else as JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
