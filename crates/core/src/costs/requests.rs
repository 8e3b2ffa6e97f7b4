//! API request types for cost and report operations.
//!
//! Every field is optional at this layer so that absence can be reported as
//! a validation error naming the field, rather than as a parse failure.

use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_int, deserialize_optional_number, deserialize_optional_string};

/// Request payload for creating a new cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCostRequest {
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub month: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub day: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub sum: Option<f64>,
}

impl CreateCostRequest {
    /// Create a fully populated request.
    pub fn new(
        user_id: i64,
        (year, month, day): (i64, i64, i64),
        description: impl Into<String>,
        category: impl Into<String>,
        sum: f64,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            year: Some(year),
            month: Some(month),
            day: Some(day),
            description: Some(description.into()),
            category: Some(category.into()),
            sum: Some(sum),
        }
    }
}

/// Query parameters for reading a monthly report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub month: Option<i64>,
}

impl ReportQuery {
    /// Create a fully populated query.
    pub fn new(user_id: i64, year: i64, month: i64) -> Self {
        Self {
            user_id: Some(user_id),
            year: Some(year),
            month: Some(month),
        }
    }
}
