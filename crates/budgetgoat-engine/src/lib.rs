mod insights;
mod report;

pub use insights::{Insight, InsightKind, generate_insights};
pub use report::{MonthlyReport, PocketStatus, build_monthly_report};
