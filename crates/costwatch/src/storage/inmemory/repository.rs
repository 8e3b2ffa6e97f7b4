//! In-memory repository implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use costwatch_core::costs::Cost;
use costwatch_core::reports::{Report, ReportKey};
use costwatch_core::storage::{CostFilter, CostRepository, ReportRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    costs: Arc<RwLock<Vec<Cost>>>,
    reports: Arc<RwLock<LruCache<ReportKey, Report>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl InMemoryRepository {
    /// Creates an empty repository holding at most `max_reports` reports.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(max_reports: usize) -> Self {
        let capacity = NonZeroUsize::new(max_reports).unwrap_or(NonZeroUsize::MIN);
        Self {
            costs: Arc::new(RwLock::new(Vec::new())),
            reports: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl CostRepository for InMemoryRepository {
    async fn next_cost_id(&self) -> Result<i64> {
        let costs = self.costs.read().await;
        Ok(costs.iter().map(|c| c.id).max().map_or(1, |max| max + 1))
    }

    async fn append_cost(&self, cost: &Cost) -> Result<()> {
        let mut costs = self.costs.write().await;
        if costs.iter().any(|c| c.id == cost.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Cost",
                id: cost.id.to_string(),
            });
        }
        costs.push(cost.clone());
        Ok(())
    }

    async fn find_costs(&self, filter: CostFilter) -> Result<Vec<Cost>> {
        let costs = self.costs.read().await;
        Ok(costs
            .iter()
            .filter(|c| {
                c.user_id == filter.user_id && c.year == filter.year && c.month == filter.month
            })
            .cloned()
            .collect())
    }

    async fn clear_costs(&self) -> Result<u64> {
        let mut costs = self.costs.write().await;
        let removed = costs.len() as u64;
        costs.clear();
        Ok(removed)
    }
}

#[async_trait]
impl ReportRepository for InMemoryRepository {
    async fn find_report(&self, key: ReportKey) -> Result<Option<Report>> {
        let mut reports = self.reports.write().await;
        Ok(reports.get(&key).cloned())
    }

    async fn put_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.write().await;
        reports.put(report.key(), report.clone());
        Ok(())
    }

    async fn invalidate_report(&self, key: ReportKey) -> Result<bool> {
        let mut reports = self.reports.write().await;
        Ok(reports.pop(&key).is_some())
    }

    async fn clear_reports(&self) -> Result<u64> {
        let mut reports = self.reports.write().await;
        let removed = reports.len() as u64;
        reports.clear();
        Ok(removed)
    }
}
