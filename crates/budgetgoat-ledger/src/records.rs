use budgetgoat_types::TransactionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input for recording a transaction against a pocket.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub pocket_id: Uuid,
    pub kind: TransactionKind,
    /// Magnitude in cents; must be positive.
    pub amount_cents: i64,
    pub note: Option<String>,
    pub category: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewTransaction {
    pub fn new(pocket_id: Uuid, kind: TransactionKind, amount_cents: i64) -> Self {
        Self {
            pocket_id,
            kind,
            amount_cents,
            note: None,
            category: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Per-category withdrawal total within one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
}
