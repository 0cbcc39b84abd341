use crate::output;
use crate::types::OutputFormat;
use anyhow::{Result, anyhow};
use budgetgoat_diagnostics::DiagnosticsLogger;
use budgetgoat_ledger::Database;
use budgetgoat_types::{Pocket, format_cents, parse_cents};

pub fn add(
    db: &Database,
    logger: &DiagnosticsLogger,
    name: &str,
    target: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let target_cents = target.map(parse_cents).transpose().map_err(|e| anyhow!(e))?;
    let pocket = db.create_pocket(name, target_cents)?;

    logger.log_info(
        "Budget",
        format!("created pocket '{}'", pocket.name),
        None,
    );

    if format.is_json() {
        output::print_json(&pocket)
    } else {
        println!("Created pocket '{}' ({})", pocket.name, pocket.id);
        Ok(())
    }
}

pub fn list(db: &Database, format: &OutputFormat) -> Result<()> {
    let pockets = db.list_pockets()?;

    if format.is_json() {
        return output::print_json(&pockets);
    }

    if pockets.is_empty() {
        println!("No pockets yet. Create one with `budgetgoat pocket add <name>`.");
        return Ok(());
    }

    for pocket in &pockets {
        println!("{}", describe(pocket));
    }
    Ok(())
}

pub fn remove(
    db: &Database,
    logger: &DiagnosticsLogger,
    selector: &str,
    format: &OutputFormat,
) -> Result<()> {
    let pocket = db.resolve_pocket(selector)?;
    db.delete_pocket(pocket.id)?;

    logger.log_info(
        "Budget",
        format!("removed pocket '{}' and its transactions", pocket.name),
        None,
    );

    if format.is_json() {
        output::print_json(&pocket)
    } else {
        println!(
            "Removed pocket '{}' and its transactions ({} released)",
            pocket.name,
            format_cents(pocket.balance_cents)
        );
        Ok(())
    }
}

pub fn set_target(
    db: &Database,
    logger: &DiagnosticsLogger,
    selector: &str,
    target: &str,
    format: &OutputFormat,
) -> Result<()> {
    let pocket = db.resolve_pocket(selector)?;

    let target_cents = if target.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(parse_cents(target).map_err(|e| anyhow!(e))?)
    };
    db.set_pocket_target(pocket.id, target_cents)?;

    logger.log_info(
        "Budget",
        match target_cents {
            Some(cents) => format!(
                "set target of '{}' to {}",
                pocket.name,
                format_cents(cents)
            ),
            None => format!("cleared target of '{}'", pocket.name),
        },
        None,
    );

    let updated = db
        .get_pocket(pocket.id)?
        .ok_or_else(|| anyhow!("pocket disappeared while updating"))?;

    if format.is_json() {
        output::print_json(&updated)
    } else {
        println!("{}", describe(&updated));
        Ok(())
    }
}

/// One-line plain rendering: name, balance, and target progress when set.
fn describe(pocket: &Pocket) -> String {
    match (pocket.target_cents, pocket.progress()) {
        (Some(target), Some(progress)) => format!(
            "{}  {} / {} ({:.0}%)",
            pocket.name,
            format_cents(pocket.balance_cents),
            format_cents(target),
            progress * 100.0
        ),
        _ => format!("{}  {}", pocket.name, format_cents(pocket.balance_cents)),
    }
}
