use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;

use costwatch_core::costs::{validate_create_cost, Cost, CreateCostRequest, YearBounds};
use costwatch_core::reports::ReportKey;
use costwatch_core::storage::{CostRepository, ReportRepository, Result};

use super::ServiceError;
use crate::config::InvalidationMode;

/// Write path for cost records.
#[derive(Clone)]
pub struct CostService {
    costs: Arc<dyn CostRepository>,
    reports: Arc<dyn ReportRepository>,
    bounds: YearBounds,
    mode: InvalidationMode,
    pending: Arc<Mutex<JoinSet<()>>>,
}

impl CostService {
    pub fn new(
        costs: Arc<dyn CostRepository>,
        reports: Arc<dyn ReportRepository>,
        bounds: YearBounds,
        mode: InvalidationMode,
    ) -> Self {
        Self {
            costs,
            reports,
            bounds,
            mode,
            pending: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    /// Validates and stores a new cost, then invalidates the report for its
    /// month.
    ///
    /// In [`InvalidationMode::Deferred`] the invalidation runs on a tracked
    /// task (see [`CostService::drain_invalidations`]) and its failure is only
    /// logged. In [`InvalidationMode::Inline`] an
    /// invalidation failure is returned, but the cost stays stored.
    pub async fn create_cost(&self, request: &CreateCostRequest) -> Result<Cost, ServiceError> {
        let new_cost = validate_create_cost(request, self.bounds)?;

        let id = self.costs.next_cost_id().await?;
        let cost = new_cost.into_cost(id);
        self.costs.append_cost(&cost).await?;

        tracing::info!(
            cost_id = cost.id,
            user_id = cost.user_id,
            category = %cost.category,
            "Created cost"
        );

        let key = cost.report_key();
        match self.mode {
            InvalidationMode::Deferred => {
                let reports = self.reports.clone();
                let task = async move {
                    if let Err(err) = invalidate_report(reports.as_ref(), key).await {
                        tracing::error!(%key, error = %err, "Failed to invalidate report");
                    }
                };
                match self.pending.lock() {
                    Ok(mut pending) => {
                        while pending.try_join_next().is_some() {}
                        pending.spawn(task);
                    }
                    Err(_) => {
                        tracing::warn!(%key, "Invalidation tracker poisoned, spawning untracked");
                        tokio::spawn(task);
                    }
                }
            }
            InvalidationMode::Inline => {
                invalidate_report(self.reports.as_ref(), key)
                    .await
                    .inspect_err(|err| {
                        tracing::error!(
                            %key,
                            cost_id = cost.id,
                            error = %err,
                            "Failed to invalidate report after storing cost"
                        )
                    })?;
            }
        }

        Ok(cost)
    }

    /// Waits for every deferred invalidation spawned so far.
    ///
    /// Called on shutdown so a report made stale by a just-stored cost does
    /// not outlive the process in a durable store.
    pub async fn drain_invalidations(&self) {
        let mut pending = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return,
        };

        let count = pending.len();
        while let Some(result) = pending.join_next().await {
            if let Err(err) = result {
                tracing::error!(error = %err, "Invalidation task failed");
            }
        }
        if count > 0 {
            tracing::debug!(count, "Drained pending invalidations");
        }
    }
}

async fn invalidate_report(reports: &dyn ReportRepository, key: ReportKey) -> Result<()> {
    if reports.invalidate_report(key).await? {
        tracing::debug!(%key, "Invalidated report");
    } else {
        tracing::trace!(%key, "No report to invalidate");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ReportBuilder, ReportService};
    use crate::storage::InMemoryRepository;
    use async_trait::async_trait;
    use costwatch_core::costs::{ReportQuery, ValidationError};
    use costwatch_core::reports::Report;
    use costwatch_core::storage::RepositoryError;

    fn services(
        repo: &Arc<InMemoryRepository>,
        mode: InvalidationMode,
    ) -> (CostService, ReportService) {
        let costs = CostService::new(repo.clone(), repo.clone(), YearBounds::default(), mode);
        let reports = ReportService::new(
            repo.clone(),
            ReportBuilder::new(repo.clone()),
            YearBounds::default(),
        );
        (costs, reports)
    }

    fn request(month: i64, category: &str) -> CreateCostRequest {
        CreateCostRequest::new(1, (2024, month, 15), "lunch", category, 12.5)
    }

    /// Report store whose invalidation always fails.
    struct BrokenReports;

    #[async_trait]
    impl ReportRepository for BrokenReports {
        async fn find_report(&self, _key: ReportKey) -> Result<Option<Report>> {
            Ok(None)
        }

        async fn put_report(&self, _report: &Report) -> Result<()> {
            Ok(())
        }

        async fn invalidate_report(&self, _key: ReportKey) -> Result<bool> {
            Err(RepositoryError::ConnectionFailed("report store down".to_string()))
        }

        async fn clear_reports(&self) -> Result<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = Arc::new(InMemoryRepository::default());
        let (costs, _) = services(&repo, InvalidationMode::Inline);

        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(costs.create_cost(&request(3, "food")).await.unwrap().id);
        }

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_created_cost_echoes_request() {
        let repo = Arc::new(InMemoryRepository::default());
        let (costs, _) = services(&repo, InvalidationMode::Inline);

        let cost = costs.create_cost(&request(3, "sport")).await.unwrap();

        assert_eq!(cost.user_id, 1);
        assert_eq!((cost.year, cost.month, cost.day), (2024, 3, 15));
        assert_eq!(cost.description, "lunch");
        assert_eq!(cost.category, "sport");
        assert_eq!(cost.sum, 12.5);
    }

    #[tokio::test]
    async fn test_invalid_request_writes_nothing() {
        let repo = Arc::new(InMemoryRepository::default());
        let (costs, _) = services(&repo, InvalidationMode::Inline);

        let result = costs.create_cost(&request(3, "groceries")).await;

        assert_eq!(
            result,
            Err(ServiceError::Validation(ValidationError::InvalidCategory(
                "groceries".to_string()
            )))
        );
        assert_eq!(repo.next_cost_id().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_inline_invalidation_refreshes_report() {
        let repo = Arc::new(InMemoryRepository::default());
        let (costs, reports) = services(&repo, InvalidationMode::Inline);
        let query = ReportQuery::new(1, 2024, 3);

        costs.create_cost(&request(3, "food")).await.unwrap();
        let before = reports.get_report(&query).await.unwrap();
        costs.create_cost(&request(3, "food")).await.unwrap();
        let after = reports.get_report(&query).await.unwrap();

        assert_eq!(before["food"].len(), 1);
        assert_eq!(after["food"].len(), 2);
    }

    #[tokio::test]
    async fn test_other_months_keep_their_report() {
        let repo = Arc::new(InMemoryRepository::default());
        let (costs, reports) = services(&repo, InvalidationMode::Inline);
        let february = ReportKey::new(1, 2024, 2);

        let stored = reports.materialize(february).await.unwrap();
        costs.create_cost(&request(3, "food")).await.unwrap();

        let still = repo.find_report(february).await.unwrap().unwrap();
        assert_eq!(still.materialized_at, stored.materialized_at);
    }

    #[tokio::test]
    async fn test_deferred_invalidation_eventually_lands() {
        let repo = Arc::new(InMemoryRepository::default());
        let (costs, reports) = services(&repo, InvalidationMode::Deferred);
        let key = ReportKey::new(1, 2024, 3);

        reports.materialize(key).await.unwrap();
        costs.create_cost(&request(3, "food")).await.unwrap();

        // The spawned task has not run yet, so the stale report is still
        // served.
        let stale = reports.get_report(&ReportQuery::new(1, 2024, 3)).await.unwrap();
        assert!(stale["food"].is_empty());

        for _ in 0..100 {
            if repo.find_report(key).await.unwrap().is_none() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(repo.find_report(key).await.unwrap().is_none());

        let details = reports.get_report(&ReportQuery::new(1, 2024, 3)).await.unwrap();
        assert_eq!(details["food"].len(), 1);
    }

    #[tokio::test]
    async fn test_drain_waits_for_deferred_invalidation() {
        let repo = Arc::new(InMemoryRepository::default());
        let (costs, reports) = services(&repo, InvalidationMode::Deferred);
        let key = ReportKey::new(1, 2024, 3);

        reports.materialize(key).await.unwrap();
        costs.create_cost(&request(3, "food")).await.unwrap();
        costs.create_cost(&request(3, "health")).await.unwrap();

        costs.drain_invalidations().await;

        assert!(repo.find_report(key).await.unwrap().is_none());
        // Draining twice is a no-op.
        costs.drain_invalidations().await;
    }

    #[tokio::test]
    async fn test_inline_failure_keeps_the_cost() {
        let repo = Arc::new(InMemoryRepository::default());
        let costs = CostService::new(
            repo.clone(),
            Arc::new(BrokenReports),
            YearBounds::default(),
            InvalidationMode::Inline,
        );

        let result = costs.create_cost(&request(3, "food")).await;

        assert!(matches!(
            result,
            Err(ServiceError::Store(RepositoryError::ConnectionFailed(_)))
        ));
        assert_eq!(repo.next_cost_id().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_deferred_failure_is_not_returned() {
        let repo = Arc::new(InMemoryRepository::default());
        let costs = CostService::new(
            repo.clone(),
            Arc::new(BrokenReports),
            YearBounds::default(),
            InvalidationMode::Deferred,
        );

        let cost = costs.create_cost(&request(3, "food")).await.unwrap();
        tokio::task::yield_now().await;

        assert_eq!(cost.id, 1);
    }
}
