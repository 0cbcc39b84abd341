use crate::report::MonthlyReport;
use budgetgoat_types::{MonthlySummary, format_cents};
use serde::Serialize;

/// What an insight is about, for presentation grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Savings,
    Spending,
    Target,
    Activity,
}

/// One human-readable observation about a month of ledger activity.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

/// Share of total withdrawals above which the top category gets called out.
const TOP_CATEGORY_SHARE: f64 = 0.4;

/// Target progress above which a pocket counts as "almost there".
const NEAR_TARGET_PROGRESS: f64 = 0.8;

/// Derive deterministic textual insights from a monthly report.
///
/// `previous` is the prior month's summary when one exists; it drives the
/// savings comparison. Output order is stable: activity, savings,
/// spending, targets.
pub fn generate_insights(
    report: &MonthlyReport,
    previous: Option<&MonthlySummary>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if report.summary.transaction_count == 0 {
        insights.push(Insight {
            kind: InsightKind::Activity,
            message: format!("No transactions recorded in {}.", report.month),
        });
        return insights;
    }

    insights.push(Insight {
        kind: InsightKind::Activity,
        message: format!(
            "{} transactions in {}: {} saved, {} spent.",
            report.summary.transaction_count,
            report.month,
            format_cents(report.summary.deposits_cents),
            format_cents(report.summary.withdrawals_cents),
        ),
    });

    if let Some(previous) = previous.filter(|p| p.transaction_count > 0) {
        let direction = if report.summary.net_cents >= previous.net_cents {
            "up from"
        } else {
            "down from"
        };
        insights.push(Insight {
            kind: InsightKind::Savings,
            message: format!(
                "Net savings of {} in {}, {} {} in {}.",
                format_cents(report.summary.net_cents),
                report.month,
                direction,
                format_cents(previous.net_cents),
                previous.month,
            ),
        });
    }

    if let Some(top) = report.categories.first()
        && report.summary.withdrawals_cents > 0
    {
        let share = top.total_cents as f64 / report.summary.withdrawals_cents as f64;
        let message = if share >= TOP_CATEGORY_SHARE {
            format!(
                "'{}' made up {:.0}% of spending ({}).",
                top.category,
                share * 100.0,
                format_cents(top.total_cents),
            )
        } else {
            format!(
                "Top spending category: '{}' ({}).",
                top.category,
                format_cents(top.total_cents),
            )
        };
        insights.push(Insight {
            kind: InsightKind::Spending,
            message,
        });
    }

    for status in &report.pockets {
        let Some(progress) = status.progress else {
            continue;
        };
        if progress >= 1.0 {
            insights.push(Insight {
                kind: InsightKind::Target,
                message: format!(
                    "Pocket '{}' reached its target of {}.",
                    status.pocket.name,
                    format_cents(status.pocket.target_cents.unwrap_or(0)),
                ),
            });
        } else if progress >= NEAR_TARGET_PROGRESS {
            insights.push(Insight {
                kind: InsightKind::Target,
                message: format!(
                    "Pocket '{}' is at {:.0}% of its target.",
                    status.pocket.name,
                    progress * 100.0,
                ),
            });
        }
    }

    insights
}
