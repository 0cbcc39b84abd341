use crate::output;
use crate::types::OutputFormat;
use anyhow::{Context, Result, anyhow};
use budgetgoat_diagnostics::DiagnosticsLogger;
use budgetgoat_ledger::{Database, NewTransaction};
use budgetgoat_store::{FileBackend, Setting};
use budgetgoat_types::{
    MonthKey, Transaction, TransactionKind, format_cents, keys, parse_cents,
};
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

#[allow(clippy::too_many_arguments)]
pub fn add(
    db: &Database,
    logger: &DiagnosticsLogger,
    pocket_selector: &str,
    amount: &str,
    withdraw: bool,
    note: Option<String>,
    category: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let pocket = db.resolve_pocket(pocket_selector)?;
    let amount_cents = parse_cents(amount).map_err(|e| anyhow!(e))?;
    let kind = if withdraw {
        TransactionKind::Withdrawal
    } else {
        TransactionKind::Deposit
    };

    let mut new = NewTransaction::new(pocket.id, kind, amount_cents);
    if let Some(note) = note {
        new = new.with_note(note);
    }
    if let Some(category) = category {
        new = new.with_category(category);
    }

    let tx = db.record_transaction(&new)?;

    logger.log_info(
        "Budget",
        format!(
            "recorded {} of {} against '{}'",
            kind,
            format_cents(tx.amount_cents),
            pocket.name
        ),
        None,
    );

    if format.is_json() {
        output::print_json(&tx)
    } else {
        println!(
            "Recorded {} of {} against '{}' ({})",
            kind,
            format_cents(tx.amount_cents),
            pocket.name,
            tx.id
        );
        Ok(())
    }
}

pub fn list(
    db: &Database,
    pocket_selector: Option<&str>,
    month: Option<&str>,
    limit: usize,
    format: &OutputFormat,
) -> Result<()> {
    let pocket = pocket_selector
        .map(|selector| db.resolve_pocket(selector))
        .transpose()?;
    let month = month
        .map(|raw| raw.parse::<MonthKey>())
        .transpose()
        .map_err(|e| anyhow!(e))?;

    let transactions = db.list_transactions(pocket.as_ref().map(|p| p.id), month.as_ref(), limit)?;

    if format.is_json() {
        return output::print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let names = pocket_names(db)?;
    for tx in &transactions {
        println!("{}", describe(tx, &names));
    }
    Ok(())
}

pub fn remove(
    db: &Database,
    logger: &DiagnosticsLogger,
    id: &str,
    format: &OutputFormat,
) -> Result<()> {
    let id = Uuid::parse_str(id).map_err(|_| anyhow!("invalid transaction id '{}'", id))?;
    let tx = db.delete_transaction(id)?;

    logger.log_info(
        "Budget",
        format!(
            "removed {} of {} and reverted the balance",
            tx.kind,
            format_cents(tx.amount_cents)
        ),
        None,
    );

    if format.is_json() {
        output::print_json(&tx)
    } else {
        println!(
            "Removed {} of {} ({}); balance reverted",
            tx.kind,
            format_cents(tx.amount_cents),
            tx.id
        );
        Ok(())
    }
}

pub fn export(
    db: &Database,
    data_dir: &Path,
    logger: &DiagnosticsLogger,
    output_path: Option<&Path>,
) -> Result<()> {
    let transactions = db.list_transactions(None, None, usize::MAX)?;
    let names = pocket_names(db)?;

    match output_path {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_csv(&mut writer, &transactions, &names)?;
            writer.flush()?;
            println!(
                "Exported {} transactions to {}",
                transactions.len(),
                path.display()
            );
        }
        None => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            write_csv(&mut writer, &transactions, &names)?;
            writer.flush()?;
        }
    }

    logger.log_info(
        "Budget",
        format!("exported {} transactions", transactions.len()),
        None,
    );
    remember_export_time(data_dir, logger);

    Ok(())
}

fn write_csv<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    transactions: &[Transaction],
    names: &HashMap<Uuid, String>,
) -> Result<()> {
    writer.write_record(["id", "pocket", "kind", "amount", "note", "category", "timestamp"])?;
    for tx in transactions {
        writer.write_record([
            tx.id.to_string(),
            names
                .get(&tx.pocket_id)
                .cloned()
                .unwrap_or_else(|| tx.pocket_id.to_string()),
            tx.kind.to_string(),
            format_cents(tx.amount_cents),
            tx.note.clone().unwrap_or_default(),
            tx.category.clone().unwrap_or_default(),
            tx.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        ])?;
    }
    Ok(())
}

/// Stamp the export time into preferences, best-effort. A storage
/// failure degrades to a warning diagnostic.
fn remember_export_time(data_dir: &Path, logger: &DiagnosticsLogger) {
    let backend = Arc::new(FileBackend::new(data_dir.join("prefs")));
    let mut setting = Setting::new(backend, keys::LAST_EXPORT_AT, String::new());
    if let Some(error) = setting.save(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)) {
        logger.log_warning(
            "Prefs",
            format!("could not record export time: {}", error),
            None,
        );
    }
}

fn pocket_names(db: &Database) -> Result<HashMap<Uuid, String>> {
    Ok(db
        .list_pockets()?
        .into_iter()
        .map(|pocket| (pocket.id, pocket.name))
        .collect())
}

fn describe(tx: &Transaction, names: &HashMap<Uuid, String>) -> String {
    let pocket = names
        .get(&tx.pocket_id)
        .map(String::as_str)
        .unwrap_or("(deleted pocket)");
    let mut line = format!(
        "{}  {:<10}  {:>10}  {}",
        tx.timestamp.format("%Y-%m-%d"),
        tx.kind.to_string(),
        format_cents(tx.amount_cents),
        pocket
    );
    if let Some(category) = &tx.category {
        line.push_str(&format!("  [{}]", category));
    }
    if let Some(note) = &tx.note {
        line.push_str(&format!("  {}", note));
    }
    line.push_str(&format!("  ({})", tx.id));
    line
}
