//! SQLite repository implementation.
//!
//! Implements the repository traits from `costwatch_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use costwatch_core::costs::Cost;
use costwatch_core::reports::{Report, ReportKey};
use costwatch_core::storage::{CostFilter, CostRepository, ReportRepository, RepositoryError, Result};

use super::conversions::{details_to_json, format_datetime, row_to_cost, row_to_report};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and ensures the schema exists.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// CostRepository implementation
// ============================================================================

#[async_trait]
impl CostRepository for SqliteRepository {
    async fn next_cost_id(&self) -> Result<i64> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::SELECT_NEXT_COST_ID, [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Cost", ""))
    }

    async fn append_cost(&self, cost: &Cost) -> Result<()> {
        let cost = cost.clone();
        let cost_id = cost.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_COST,
                    rusqlite::params![
                        cost.id,
                        cost.user_id,
                        cost.year,
                        cost.month,
                        cost.day,
                        cost.description,
                        cost.category,
                        cost.sum
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Cost", cost_id))
    }

    async fn find_costs(&self, filter: CostFilter) -> Result<Vec<Cost>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_COSTS_BY_PERIOD)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(
                        rusqlite::params![filter.user_id, filter.year, filter.month],
                        row_to_cost,
                    )
                    .map_err(wrap_err)?;

                let mut costs = Vec::new();
                for row_result in rows {
                    costs.push(row_result.map_err(wrap_err)?);
                }
                Ok(costs)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Cost", ""))
    }

    async fn clear_costs(&self) -> Result<u64> {
        self.conn
            .call(|conn| {
                let rows = conn
                    .execute(schema::DELETE_ALL_COSTS, [])
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Cost", ""))
    }
}

// ============================================================================
// ReportRepository implementation
// ============================================================================

#[async_trait]
impl ReportRepository for SqliteRepository {
    async fn find_report(&self, key: ReportKey) -> Result<Option<Report>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_REPORT_BY_PERIOD)
                    .map_err(wrap_err)?;
                match stmt.query_row(
                    rusqlite::params![key.user_id, key.year, key.month],
                    row_to_report,
                ) {
                    Ok(report) => Ok(Some(report)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Report", key.to_string()))
    }

    async fn put_report(&self, report: &Report) -> Result<()> {
        let key = report.key();
        let details = details_to_json(&report.details)?;
        let materialized_at = format_datetime(&report.materialized_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_REPORT,
                    rusqlite::params![key.user_id, key.year, key.month, details, materialized_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Report", key.to_string()))
    }

    async fn invalidate_report(&self, key: ReportKey) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::DELETE_REPORTS_BY_PERIOD,
                        rusqlite::params![key.user_id, key.year, key.month],
                    )
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Report", key.to_string()))
    }

    async fn clear_reports(&self) -> Result<u64> {
        self.conn
            .call(|conn| {
                let rows = conn
                    .execute(schema::DELETE_ALL_REPORTS, [])
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Report", ""))
    }
}
