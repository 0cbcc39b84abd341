use crate::config::Config;
use crate::output;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use budgetgoat_diagnostics::DiagnosticsLogger;
use budgetgoat_ledger::Database;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct InitResult {
    data_dir: String,
    config_path: String,
    database_path: String,
    refreshed: bool,
}

pub fn handle(
    data_dir: &Path,
    refresh: bool,
    logger: &DiagnosticsLogger,
    format: &OutputFormat,
) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    std::fs::create_dir_all(data_dir.join("prefs"))
        .with_context(|| format!("creating prefs directory in {}", data_dir.display()))?;

    let config_path = data_dir.join("config.toml");
    if refresh || !config_path.exists() {
        Config::default().save_to(&config_path)?;
    }

    // Opening runs the idempotent schema setup, so this both creates a
    // fresh database and migrates an existing one.
    let database_path = data_dir.join("budgetgoat.db");
    Database::open(&database_path)
        .with_context(|| format!("creating ledger database at {}", database_path.display()))?;

    logger.log_info(
        "Init",
        format!("initialized data directory at {}", data_dir.display()),
        None,
    );

    if format.is_json() {
        output::print_json(&InitResult {
            data_dir: data_dir.display().to_string(),
            config_path: config_path.display().to_string(),
            database_path: database_path.display().to_string(),
            refreshed: refresh,
        })
    } else {
        println!("Initialized {}", data_dir.display());
        println!("  config:   {}", config_path.display());
        println!("  database: {}", database_path.display());
        Ok(())
    }
}
