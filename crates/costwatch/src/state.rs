//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The services hold repository trait objects, and the
//! backend is chosen at compile time via feature flags.

use std::sync::Arc;

use costwatch_core::storage::{CostRepository, ReportRepository, Result};

use crate::config::Config;
use crate::services::{CostService, ReportBuilder, ReportService};

/// Shared application state.
///
/// This is cloned for each request handler. Every field is behind an `Arc`,
/// so clones share the same stores.
#[derive(Clone)]
pub struct AppState {
    /// Read path: cached or freshly built reports.
    pub reports: Arc<ReportService>,
    /// Write path: cost creation and report invalidation.
    pub costs: Arc<CostService>,
    cost_repo: Arc<dyn CostRepository>,
    report_repo: Arc<dyn ReportRepository>,
}

impl AppState {
    /// Wires the services on top of the given repositories.
    fn build(
        cost_repo: Arc<dyn CostRepository>,
        report_repo: Arc<dyn ReportRepository>,
        config: &Config,
    ) -> Self {
        let builder = ReportBuilder::new(cost_repo.clone());
        let reports = ReportService::new(report_repo.clone(), builder, config.report_year_bounds());
        let costs = CostService::new(
            cost_repo.clone(),
            report_repo.clone(),
            config.cost_year_bounds(),
            config.invalidation_mode,
        );

        Self {
            reports: Arc::new(reports),
            costs: Arc::new(costs),
            cost_repo,
            report_repo,
        }
    }

    /// Empties both stores.
    ///
    /// Reports are cleared first so none outlives the costs it was built from.
    pub async fn reset_stores(&self) -> Result<()> {
        let reports = self.report_repo.clear_reports().await?;
        let costs = self.cost_repo.clear_costs().await?;
        tracing::info!(costs, reports, "Cleared stores");
        Ok(())
    }
}

// ============================================================================
// Feature-specific AppState constructors
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Data is lost when the process exits.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new(config.report_cache_max_entries));
            tracing::info!(
                max_reports = config.report_cache_max_entries,
                "Using in-memory storage"
            );

            Ok(Self::build(repo.clone(), repo, config))
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");

            Ok(Self::build(repo.clone(), repo, config))
        }
    }
}

// ============================================================================
// Test support - provides constructors for unit tests
// ============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::InvalidationMode;
    use crate::storage::InMemoryRepository;

    pub(crate) fn test_config(mode: InvalidationMode) -> Config {
        Config {
            sqlite_path: ":memory:".to_string(),
            report_cache_max_entries: 100,
            cost_min_year: 1970,
            report_min_year: 1970,
            max_year: 2100,
            invalidation_mode: mode,
            request_timeout_seconds: 10,
        }
    }

    impl AppState {
        /// Creates an AppState over the given repositories for testing.
        pub(crate) fn with_repositories(
            cost_repo: Arc<dyn CostRepository>,
            report_repo: Arc<dyn ReportRepository>,
            mode: InvalidationMode,
        ) -> Self {
            Self::build(cost_repo, report_repo, &test_config(mode))
        }
    }

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        ///
        /// Invalidation runs inline so a write is visible to the next read.
        fn default() -> Self {
            let repo = Arc::new(InMemoryRepository::default());
            Self::with_repositories(repo.clone(), repo, InvalidationMode::Inline)
        }
    }

    #[tokio::test]
    async fn test_reset_stores() {
        use costwatch_core::costs::{CreateCostRequest, ReportQuery};

        let state = AppState::default();
        state
            .costs
            .create_cost(&CreateCostRequest::new(1, (2024, 1, 1), "rent", "housing", 900.0))
            .await
            .unwrap();
        state
            .reports
            .get_report(&ReportQuery::new(1, 2024, 1))
            .await
            .unwrap();

        state.reset_stores().await.unwrap();

        let created = state
            .costs
            .create_cost(&CreateCostRequest::new(1, (2024, 1, 2), "rent", "housing", 900.0))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }
}
