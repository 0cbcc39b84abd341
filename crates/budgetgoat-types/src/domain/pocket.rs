use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-defined savings bucket with a running balance and optional target.
///
/// The balance always equals the signed sum of the pocket's transactions;
/// the ledger maintains that invariant atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pocket {
    /// Unique pocket identifier.
    pub id: Uuid,
    /// Display name, unique across pockets.
    pub name: String,
    /// Current balance in integer cents.
    pub balance_cents: i64,
    /// Savings target in integer cents, if one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_cents: Option<i64>,
    /// When the pocket was created.
    pub created_at: DateTime<Utc>,
    /// When the pocket was last touched by any write.
    pub updated_at: DateTime<Utc>,
}

impl Pocket {
    /// Fraction of the target reached, if a positive target is set.
    ///
    /// May exceed 1.0 once the pocket is overfunded.
    pub fn progress(&self) -> Option<f64> {
        self.target_cents
            .filter(|target| *target > 0)
            .map(|target| self.balance_cents as f64 / target as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pocket(balance_cents: i64, target_cents: Option<i64>) -> Pocket {
        Pocket {
            id: Uuid::new_v4(),
            name: "Vacation".to_string(),
            balance_cents,
            target_cents,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_progress_without_target() {
        assert_eq!(pocket(5000, None).progress(), None);
    }

    #[test]
    fn test_progress_with_target() {
        let progress = pocket(5000, Some(10000)).progress().unwrap();
        assert!((progress - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_ignores_nonpositive_target() {
        assert_eq!(pocket(5000, Some(0)).progress(), None);
    }

    #[test]
    fn test_progress_can_exceed_one() {
        let progress = pocket(15000, Some(10000)).progress().unwrap();
        assert!(progress > 1.0);
    }
}
