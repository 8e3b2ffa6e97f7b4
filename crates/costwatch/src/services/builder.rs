use std::sync::Arc;

use costwatch_core::reports::{build_report_details, ReportDetails, ReportKey};
use costwatch_core::storage::{CostFilter, CostRepository, Result};

/// Builds report details from the cost store.
#[derive(Clone)]
pub struct ReportBuilder {
    costs: Arc<dyn CostRepository>,
}

impl ReportBuilder {
    pub fn new(costs: Arc<dyn CostRepository>) -> Self {
        Self { costs }
    }

    /// Aggregates every cost recorded for the key's user and month.
    pub async fn build(&self, key: ReportKey) -> Result<ReportDetails> {
        let costs = self.costs.find_costs(CostFilter::from(key)).await?;
        tracing::debug!(%key, costs = costs.len(), "Aggregating report");
        Ok(build_report_details(&costs))
    }
}
