use serde::{Deserialize, Serialize};

use crate::reports::ReportKey;

/// Exact-match filter over the cost store.
///
/// All three fields must match numerically; there is no range or partial
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostFilter {
    pub user_id: i64,
    pub year: i32,
    pub month: u32,
}

impl CostFilter {
    /// Creates a filter for one user's month.
    pub fn new(user_id: i64, year: i32, month: u32) -> Self {
        Self {
            user_id,
            year,
            month,
        }
    }
}

impl From<ReportKey> for CostFilter {
    fn from(key: ReportKey) -> Self {
        Self::new(key.user_id, key.year, key.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_report_key() {
        let key = ReportKey::new(9, 2024, 2);
        assert_eq!(CostFilter::from(key), CostFilter::new(9, 2024, 2));
    }
}
