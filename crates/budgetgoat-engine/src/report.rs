use budgetgoat_ledger::{CategoryTotal, Database, Result};
use budgetgoat_types::{MonthKey, MonthlySummary, Pocket};
use serde::Serialize;

/// Snapshot of one calendar month, assembled from the ledger for
/// presentation.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: MonthKey,
    pub summary: MonthlySummary,
    /// Withdrawal totals per category, largest first.
    pub categories: Vec<CategoryTotal>,
    /// Every pocket with its current target progress.
    pub pockets: Vec<PocketStatus>,
}

/// A pocket together with its computed target progress.
#[derive(Debug, Clone, Serialize)]
pub struct PocketStatus {
    #[serde(flatten)]
    pub pocket: Pocket,
    /// Fraction of the target reached; absent without a positive target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

pub fn build_monthly_report(db: &Database, month: &MonthKey) -> Result<MonthlyReport> {
    let summary = db.monthly_summary(month)?;
    let categories = db.category_totals(month)?;
    let pockets = db
        .list_pockets()?
        .into_iter()
        .map(|pocket| PocketStatus {
            progress: pocket.progress(),
            pocket,
        })
        .collect();

    Ok(MonthlyReport {
        month: month.clone(),
        summary,
        categories,
        pockets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetgoat_ledger::NewTransaction;
    use budgetgoat_types::TransactionKind;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_build_monthly_report() {
        let db = Database::open_in_memory().unwrap();
        let pocket = db.create_pocket("Vacation", Some(10_000)).unwrap();
        db.record_transaction(
            &NewTransaction::new(pocket.id, TransactionKind::Deposit, 7_500)
                .at(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
        )
        .unwrap();
        db.record_transaction(
            &NewTransaction::new(pocket.id, TransactionKind::Withdrawal, 1_000)
                .at(Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap())
                .with_category("fees"),
        )
        .unwrap();

        let month: MonthKey = "2026-03".parse().unwrap();
        let report = build_monthly_report(&db, &month).unwrap();

        assert_eq!(report.summary.net_cents, 6_500);
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].category, "fees");
        assert_eq!(report.pockets.len(), 1);
        let progress = report.pockets[0].progress.unwrap();
        assert!((progress - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_report_for_empty_month() {
        let db = Database::open_in_memory().unwrap();
        let month: MonthKey = "2026-01".parse().unwrap();

        let report = build_monthly_report(&db, &month).unwrap();
        assert_eq!(report.summary.transaction_count, 0);
        assert!(report.categories.is_empty());
        assert!(report.pockets.is_empty());
    }
}
