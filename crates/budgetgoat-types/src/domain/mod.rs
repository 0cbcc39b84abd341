mod month;
mod pocket;
mod transaction;

pub use month::MonthKey;
pub use pocket::Pocket;
pub use transaction::{MonthlySummary, Transaction, TransactionKind};
