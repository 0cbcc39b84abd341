use crate::output;
use crate::types::OutputFormat;
use anyhow::{Result, anyhow};
use budgetgoat_engine::{Insight, MonthlyReport, build_monthly_report, generate_insights};
use budgetgoat_ledger::Database;
use budgetgoat_types::{MonthKey, format_cents};
use serde::Serialize;

#[derive(Serialize)]
struct ReportOutput {
    #[serde(flatten)]
    report: MonthlyReport,
    insights: Vec<Insight>,
}

pub fn handle(db: &Database, month: Option<&str>, format: &OutputFormat) -> Result<()> {
    let month = match month {
        Some(raw) => raw.parse::<MonthKey>().map_err(|e| anyhow!(e))?,
        None => MonthKey::current(),
    };

    let report = build_monthly_report(db, &month)?;
    let previous = db.monthly_summary(&month.previous())?;
    let insights = generate_insights(&report, Some(&previous));

    if format.is_json() {
        return output::print_json(&ReportOutput { report, insights });
    }

    println!("Report for {}", month);
    println!("  Deposits:    {:>12}", format_cents(report.summary.deposits_cents));
    println!(
        "  Withdrawals: {:>12}",
        format_cents(report.summary.withdrawals_cents)
    );
    println!(
        "  Net:         {:>12}  ({} transactions)",
        format_cents(report.summary.net_cents),
        report.summary.transaction_count
    );

    if !report.categories.is_empty() {
        println!();
        println!("Spending by category:");
        for total in &report.categories {
            println!("  {:<16} {:>12}", total.category, format_cents(total.total_cents));
        }
    }

    if !report.pockets.is_empty() {
        println!();
        println!("Pockets:");
        for status in &report.pockets {
            match (status.pocket.target_cents, status.progress) {
                (Some(target), Some(progress)) => println!(
                    "  {:<16} {:>12} / {} ({:.0}%)",
                    status.pocket.name,
                    format_cents(status.pocket.balance_cents),
                    format_cents(target),
                    progress * 100.0
                ),
                _ => println!(
                    "  {:<16} {:>12}",
                    status.pocket.name,
                    format_cents(status.pocket.balance_cents)
                ),
            }
        }
    }

    if !insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &insights {
            println!("  - {}", insight.message);
        }
    }

    Ok(())
}
