use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month key in `YYYY-MM` form.
///
/// Matches the first seven characters of an RFC 3339 timestamp, which is
/// what the ledger's month filters compare against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// Month the given timestamp falls in.
    pub fn from_timestamp(ts: &DateTime<Utc>) -> Self {
        Self(format!("{:04}-{:02}", ts.year(), ts.month()))
    }

    /// Current month at call time.
    pub fn current() -> Self {
        Self::from_timestamp(&Utc::now())
    }

    /// The month immediately before this one.
    pub fn previous(&self) -> Self {
        let (year, month) = self.parts();
        if month == 1 {
            Self(format!("{:04}-{:02}", year - 1, 12))
        } else {
            Self(format!("{:04}-{:02}", year, month - 1))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parts(&self) -> (i32, u32) {
        // Validated at construction, so these slices always parse.
        let year = self.0[..4].parse().unwrap_or(0);
        let month = self.0[5..].parse().unwrap_or(1);
        (year, month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == 7
            && s.as_bytes()[4] == b'-'
            && s[..4].chars().all(|c| c.is_ascii_digit())
            && s[5..].chars().all(|c| c.is_ascii_digit())
            && matches!(s[5..].parse::<u32>(), Ok(1..=12));

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("invalid month '{}', expected YYYY-MM", s))
        }
    }
}
