//! Monthly report handler.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use costwatch_core::costs::ReportQuery;
use costwatch_core::reports::ReportDetails;

use crate::{handlers::ApiError, state::AppState};

/// GET /report?user_id=&year=&month= - Report details for one user's month.
pub async fn get_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<ReportDetails>, ApiError> {
    let Query(query) = query?;
    let details = state.reports.get_report(&query).await?;
    Ok(Json(details))
}
