//! Fixture helpers for deterministic ledger data.
//!
//! Tests that assert on aggregates need stable timestamps; everything
//! here pins dates instead of calling `Utc::now()`.

use anyhow::Result;
use budgetgoat_ledger::{Database, NewTransaction};
use budgetgoat_types::{Pocket, TransactionKind};
use chrono::{DateTime, TimeZone, Utc};

/// Fixed timestamp at noon UTC on the given date.
pub fn at_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid fixture date")
}

/// Seed one month of mixed activity against a pocket: a salary-sized
/// deposit on the 1st and categorized withdrawals through the month.
///
/// Produces deposits of 200.00 and withdrawals of 75.00 (rent 50.00,
/// food 25.00), netting 125.00.
pub fn seed_typical_month(
    db: &Database,
    pocket: &Pocket,
    year: i32,
    month: u32,
) -> Result<()> {
    db.record_transaction(
        &NewTransaction::new(pocket.id, TransactionKind::Deposit, 20_000)
            .with_note("salary")
            .at(at_noon(year, month, 1)),
    )?;
    db.record_transaction(
        &NewTransaction::new(pocket.id, TransactionKind::Withdrawal, 5_000)
            .with_category("rent")
            .at(at_noon(year, month, 5)),
    )?;
    db.record_transaction(
        &NewTransaction::new(pocket.id, TransactionKind::Withdrawal, 2_500)
            .with_category("food")
            .at(at_noon(year, month, 12)),
    )?;
    Ok(())
}
