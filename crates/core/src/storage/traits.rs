use async_trait::async_trait;

use crate::costs::Cost;
use crate::reports::{Report, ReportKey};

use super::{CostFilter, Result};

/// Durable collection of individual cost records.
#[async_trait]
pub trait CostRepository: Send + Sync {
    /// Returns the id the next appended cost should use.
    ///
    /// This is `max(id) + 1`, or `1` for an empty store. It is not a count, so
    /// it stays stable when records are removed. Two callers racing between
    /// this call and [`CostRepository::append_cost`] can observe the same id;
    /// the store rejects the second append with `AlreadyExists`.
    async fn next_cost_id(&self) -> Result<i64>;

    /// Persists a new cost record.
    async fn append_cost(&self, cost: &Cost) -> Result<()>;

    /// Gets every cost matching the filter, in insertion order.
    async fn find_costs(&self, filter: CostFilter) -> Result<Vec<Cost>>;

    /// Deletes every cost record. Returns how many were removed.
    async fn clear_costs(&self) -> Result<u64>;
}

/// Durable collection of materialized monthly reports.
///
/// The store does not enforce one report per key. Callers keep a single
/// authoritative report by invalidating before a new one is put.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Gets the report stored for a key, if any.
    async fn find_report(&self, key: ReportKey) -> Result<Option<Report>>;

    /// Stores a materialized report.
    async fn put_report(&self, report: &Report) -> Result<()>;

    /// Removes any report stored for a key.
    ///
    /// Returns `true` if something was removed. A missing report is not an
    /// error.
    async fn invalidate_report(&self, key: ReportKey) -> Result<bool>;

    /// Deletes every stored report. Returns how many were removed.
    async fn clear_reports(&self) -> Result<u64>;
}
