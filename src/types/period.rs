use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-window filter applied to the journal before any analytics run.
/// Boundaries are measured back from an explicit reference time, never
/// from the wall clock, so results are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    All,
    Week,
    Month,
    Quarter,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Period::All),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "quarter" => Some(Period::Quarter),
            _ => None,
        }
    }

    /// Inclusive lower bound for trade timestamps, or `None` for the
    /// unbounded period.
    pub fn cutoff(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::All => None,
            Period::Week => Some(reference - Duration::days(7)),
            Period::Month => Some(reference - Duration::days(30)),
            Period::Quarter => Some(reference - Duration::days(90)),
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>, reference: DateTime<Utc>) -> bool {
        match self.cutoff(reference) {
            Some(cutoff) => timestamp >= cutoff,
            None => true,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
