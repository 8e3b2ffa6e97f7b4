//! Row conversions for the SQLite backend.
//!
//! Pure functions between rusqlite rows and domain types. Report details are
//! stored as a JSON document in a TEXT column; timestamps as RFC 3339.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

use costwatch_core::costs::Cost;
use costwatch_core::reports::{Report, ReportDetails};
use costwatch_core::storage::{RepositoryError, Result};

/// Formats a timestamp for storage.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parses a stored timestamp.
pub fn parse_datetime(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Encodes report details for the `details` column.
pub fn details_to_json(details: &ReportDetails) -> Result<String> {
    serde_json::to_string(details).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Decodes the `details` column.
pub fn json_to_details(s: &str) -> std::result::Result<ReportDetails, serde_json::Error> {
    serde_json::from_str(s)
}

/// Reads a cost from a row selected with the column order of
/// `SELECT_COSTS_BY_PERIOD`.
pub fn row_to_cost(row: &Row<'_>) -> rusqlite::Result<Cost> {
    Ok(Cost {
        id: row.get(0)?,
        user_id: row.get(1)?,
        year: row.get(2)?,
        month: row.get(3)?,
        day: row.get(4)?,
        description: row.get(5)?,
        category: row.get(6)?,
        sum: row.get(7)?,
    })
}

/// Reads a report from a row selected with the column order of
/// `SELECT_REPORT_BY_PERIOD`.
pub fn row_to_report(row: &Row<'_>) -> rusqlite::Result<Report> {
    let details_json: String = row.get(3)?;
    let details = json_to_details(&details_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    let materialized_at: String = row.get(4)?;
    let materialized_at = parse_datetime(&materialized_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Report {
        user_id: row.get(0)?,
        year: row.get(1)?,
        month: row.get(2)?,
        details,
        materialized_at,
    })
}
