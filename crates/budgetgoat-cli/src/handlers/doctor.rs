use crate::config::Config;
use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use budgetgoat_diagnostics::{DiagnosticsLogger, LogLevel};
use budgetgoat_ledger::Database;
use budgetgoat_store::{FileBackend, StorageBackend};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CheckResult {
    name: String,
    ok: bool,
    detail: String,
}

/// Run environment checks, reporting each through the diagnostics
/// logger, then summarize from the buffer. Always exits successfully;
/// failed checks are reported, not fatal.
pub fn handle(data_dir: &Path, logger: &DiagnosticsLogger, format: &OutputFormat) -> Result<()> {
    let results = vec![
        check_data_dir(data_dir, logger),
        check_config(data_dir, logger),
        check_database(data_dir, logger),
        check_prefs_backend(data_dir, logger),
    ];

    let issues = results.iter().filter(|r| !r.ok).count();

    if format.is_json() {
        return output::print_json(&results);
    }

    println!("budgetgoat doctor");
    for result in &results {
        println!("{}", output::status_line(result.ok, &result.name, &result.detail));
    }
    println!();
    if issues == 0 {
        println!("{} checks passed, no issues found", results.len());
    } else {
        println!(
            "{} checks passed, {} issue(s) found",
            results.len() - issues,
            issues
        );
        println!();
        println!("Diagnostics:");
        for entry in logger.logs_by_level(LogLevel::Error) {
            println!("  [{}] {}", entry.context, entry.message);
        }
    }

    Ok(())
}

fn check_data_dir(data_dir: &Path, logger: &DiagnosticsLogger) -> CheckResult {
    if data_dir.is_dir() {
        logger.log_info(
            "Doctor",
            format!("data directory present at {}", data_dir.display()),
            None,
        );
        CheckResult {
            name: "data directory".to_string(),
            ok: true,
            detail: data_dir.display().to_string(),
        }
    } else {
        let err = anyhow::anyhow!(
            "data directory {} not found; run `budgetgoat init`",
            data_dir.display()
        );
        logger.log_error("Doctor", err.as_ref(), None, None);
        CheckResult {
            name: "data directory".to_string(),
            ok: false,
            detail: err.to_string(),
        }
    }
}

fn check_config(data_dir: &Path, logger: &DiagnosticsLogger) -> CheckResult {
    match Config::load_from(&data_dir.join("config.toml")) {
        Ok(_) => {
            logger.log_info("Doctor", "config parsed", None);
            CheckResult {
                name: "config".to_string(),
                ok: true,
                detail: "parsed".to_string(),
            }
        }
        Err(err) => {
            logger.log_error("Doctor", err.as_ref(), None, None);
            CheckResult {
                name: "config".to_string(),
                ok: false,
                detail: err.to_string(),
            }
        }
    }
}

fn check_database(data_dir: &Path, logger: &DiagnosticsLogger) -> CheckResult {
    if !data_dir.is_dir() {
        return CheckResult {
            name: "database".to_string(),
            ok: false,
            detail: "skipped: no data directory".to_string(),
        };
    }

    match Database::open(&data_dir.join("budgetgoat.db")).and_then(|db| db.count_pockets()) {
        Ok(count) => {
            logger.log_info("Doctor", format!("database open, {} pockets", count), None);
            CheckResult {
                name: "database".to_string(),
                ok: true,
                detail: format!("{} pockets", count),
            }
        }
        Err(err) => {
            logger.log_error("Doctor", &err, None, None);
            CheckResult {
                name: "database".to_string(),
                ok: false,
                detail: err.to_string(),
            }
        }
    }
}

/// Round-trip a probe key through the prefs backend.
fn check_prefs_backend(data_dir: &Path, logger: &DiagnosticsLogger) -> CheckResult {
    let backend = FileBackend::new(data_dir.join("prefs"));

    let roundtrip = backend
        .set_item("doctor_probe", "\"ok\"")
        .and_then(|_| backend.get_item("doctor_probe"))
        .and_then(|read| {
            backend.remove_item("doctor_probe")?;
            Ok(read)
        });

    match roundtrip {
        Ok(Some(read)) if read == "\"ok\"" => {
            logger.log_info("Doctor", "prefs backend round-trip ok", None);
            CheckResult {
                name: "prefs backend".to_string(),
                ok: true,
                detail: "round-trip ok".to_string(),
            }
        }
        Ok(_) => {
            let err = anyhow::anyhow!("prefs backend read back an unexpected value");
            logger.log_error("Doctor", err.as_ref(), None, None);
            CheckResult {
                name: "prefs backend".to_string(),
                ok: false,
                detail: err.to_string(),
            }
        }
        Err(err) => {
            logger.log_error("Doctor", &err, None, None);
            CheckResult {
                name: "prefs backend".to_string(),
                ok: false,
                detail: err.to_string(),
            }
        }
    }
}
