use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::month::MonthKey;

/// Direction of a transaction relative to its pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Stable string form used for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdrawal" => Ok(TransactionKind::Withdrawal),
            other => Err(format!("unknown transaction kind: {}", other)),
        }
    }
}

/// Single ledger movement against a pocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: Uuid,
    /// Pocket the transaction belongs to.
    pub pocket_id: Uuid,
    /// Deposit or withdrawal.
    pub kind: TransactionKind,
    /// Magnitude in integer cents, always positive; direction comes from `kind`.
    pub amount_cents: i64,
    /// Free-text note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Spending category (withdrawals mostly).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// When the transaction occurred.
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Amount with the kind's sign applied: positive for deposits,
    /// negative for withdrawals.
    pub fn signed_amount_cents(&self) -> i64 {
        match self.kind {
            TransactionKind::Deposit => self.amount_cents,
            TransactionKind::Withdrawal => -self.amount_cents,
        }
    }
}

/// Aggregated ledger activity for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub deposits_cents: i64,
    pub withdrawals_cents: i64,
    pub net_cents: i64,
    pub transaction_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in [TransactionKind::Deposit, TransactionKind::Withdrawal] {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_signed_amount() {
        let mut tx = Transaction {
            id: Uuid::new_v4(),
            pocket_id: Uuid::new_v4(),
            kind: TransactionKind::Deposit,
            amount_cents: 1250,
            note: None,
            category: None,
            timestamp: Utc::now(),
        };
        assert_eq!(tx.signed_amount_cents(), 1250);

        tx.kind = TransactionKind::Withdrawal;
        assert_eq!(tx.signed_amount_cents(), -1250);
    }
}
