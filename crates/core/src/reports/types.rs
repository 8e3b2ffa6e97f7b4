use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::costs::Cost;

/// Identifies one user's month. Reports are looked up and invalidated by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportKey {
    pub user_id: i64,
    pub year: i32,
    pub month: u32,
}

impl ReportKey {
    pub fn new(user_id: i64, year: i32, month: u32) -> Self {
        Self {
            user_id,
            year,
            month,
        }
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{:02}", self.user_id, self.year, self.month)
    }
}

/// One cost line inside a report category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub day: u32,
    pub description: String,
    pub sum: f64,
}

impl From<&Cost> for ReportItem {
    fn from(cost: &Cost) -> Self {
        Self {
            day: cost.day,
            description: cost.description.clone(),
            sum: cost.sum,
        }
    }
}

/// Category label to the costs recorded under it.
pub type ReportDetails = BTreeMap<String, Vec<ReportItem>>;

/// A materialized monthly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub user_id: i64,
    pub year: i32,
    pub month: u32,
    pub details: ReportDetails,
    pub materialized_at: DateTime<Utc>,
}

impl Report {
    /// Wraps freshly built details for a key, stamped with the current time.
    pub fn new(key: ReportKey, details: ReportDetails) -> Self {
        Self {
            user_id: key.user_id,
            year: key.year,
            month: key.month,
            details,
            materialized_at: Utc::now(),
        }
    }

    pub fn key(&self) -> ReportKey {
        ReportKey::new(self.user_id, self.year, self.month)
    }
}
