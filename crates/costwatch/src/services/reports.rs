use std::sync::Arc;

use costwatch_core::costs::{validate_report_query, ReportQuery, YearBounds};
use costwatch_core::reports::{Report, ReportDetails, ReportKey};
use costwatch_core::storage::{ReportRepository, Result};

use super::{ReportBuilder, ServiceError};

/// Read path for monthly reports.
///
/// A stored report is trusted as-is: there is no freshness check beyond the
/// invalidation done by [`CostService`](super::CostService).
#[derive(Clone)]
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    builder: ReportBuilder,
    bounds: YearBounds,
}

impl ReportService {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        builder: ReportBuilder,
        bounds: YearBounds,
    ) -> Self {
        Self {
            reports,
            builder,
            bounds,
        }
    }

    /// Validates the query and returns the report details for it.
    pub async fn get_report(&self, query: &ReportQuery) -> Result<ReportDetails, ServiceError> {
        let key = validate_report_query(query, self.bounds)?;
        let report = self.materialize(key).await?;
        Ok(report.details)
    }

    /// Returns the stored report for a key, building and storing it on a miss.
    pub async fn materialize(&self, key: ReportKey) -> Result<Report> {
        if let Some(report) = self.reports.find_report(key).await? {
            tracing::trace!(%key, "Report cache hit");
            return Ok(report);
        }

        tracing::trace!(%key, "Report cache miss");
        let details = self.builder.build(key).await?;
        let report = Report::new(key, details);
        self.reports.put_report(&report).await?;

        tracing::info!(%key, "Materialized report");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;
    use costwatch_core::costs::{Category, Cost, ValidationError};
    use costwatch_core::storage::CostRepository;

    fn service(repo: &Arc<InMemoryRepository>) -> ReportService {
        ReportService::new(
            repo.clone(),
            ReportBuilder::new(repo.clone()),
            YearBounds::default(),
        )
    }

    async fn add_cost(repo: &InMemoryRepository, id: i64, month: u32, category: Category) {
        repo.append_cost(&Cost {
            id,
            user_id: 1,
            year: 2024,
            month,
            day: 1,
            description: format!("cost {id}"),
            category: category.as_str().to_string(),
            sum: 10.0,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_miss_builds_and_stores() {
        let repo = Arc::new(InMemoryRepository::default());
        add_cost(&repo, 1, 3, Category::Food).await;
        let key = ReportKey::new(1, 2024, 3);

        let details = service(&repo)
            .get_report(&ReportQuery::new(1, 2024, 3))
            .await
            .unwrap();

        assert_eq!(details["food"].len(), 1);
        let stored = repo.find_report(key).await.unwrap().unwrap();
        assert_eq!(stored.details, details);
    }

    #[tokio::test]
    async fn test_hit_is_trusted_without_rebuilding() {
        let repo = Arc::new(InMemoryRepository::default());
        let service = service(&repo);
        let query = ReportQuery::new(1, 2024, 3);

        let first = service.get_report(&query).await.unwrap();

        // A cost appended behind the service's back is not seen until the
        // report is invalidated.
        add_cost(&repo, 1, 3, Category::Sport).await;
        let second = service.get_report(&query).await.unwrap();

        assert_eq!(first, second);
        assert!(second["sport"].is_empty());
    }

    #[tokio::test]
    async fn test_repeated_hits_are_identical() {
        let repo = Arc::new(InMemoryRepository::default());
        add_cost(&repo, 1, 3, Category::Food).await;
        add_cost(&repo, 2, 3, Category::Health).await;
        let service = service(&repo);
        let query = ReportQuery::new(1, 2024, 3);

        let first = serde_json::to_vec(&service.get_report(&query).await.unwrap()).unwrap();
        for _ in 0..3 {
            let again = serde_json::to_vec(&service.get_report(&query).await.unwrap()).unwrap();
            assert_eq!(again, first);
        }
    }

    #[tokio::test]
    async fn test_materialize_keeps_the_stored_report() {
        let repo = Arc::new(InMemoryRepository::default());
        let service = service(&repo);
        let key = ReportKey::new(1, 2024, 3);

        let first = service.materialize(key).await.unwrap();
        let second = service.materialize(key).await.unwrap();

        assert_eq!(first.materialized_at, second.materialized_at);
    }

    #[tokio::test]
    async fn test_empty_month_has_every_category() {
        let repo = Arc::new(InMemoryRepository::default());

        let details = service(&repo)
            .get_report(&ReportQuery::new(1, 2030, 1))
            .await
            .unwrap();

        assert_eq!(details.len(), 7);
        assert!(details.values().all(Vec::is_empty));
    }

    #[tokio::test]
    async fn test_invalid_query_does_not_touch_the_store() {
        let repo = Arc::new(InMemoryRepository::default());

        let result = service(&repo)
            .get_report(&ReportQuery::new(1, 2024, 13))
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::InvalidDate(_)))
        ));
        assert_eq!(repo.clear_reports().await.unwrap(), 0);
    }
}
