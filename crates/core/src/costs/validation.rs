//! Input validation for cost creation and report reads.
//!
//! Validation is pure and runs before any store access, so a rejected
//! request never leaves a partial write behind.

use chrono::NaiveDate;

use crate::reports::ReportKey;

use super::error::ValidationError;
use super::requests::{CreateCostRequest, ReportQuery};
use super::types::{Category, NewCost};

/// Inclusive range of accepted years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn check(&self, year: i64) -> Result<i32, ValidationError> {
        i32::try_from(year)
            .ok()
            .filter(|year| (self.min..=self.max).contains(year))
            .ok_or_else(|| {
                ValidationError::InvalidDate(format!(
                    "year must be between {} and {}",
                    self.min, self.max
                ))
            })
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self::new(1970, 2100)
    }
}

/// Validates a create request and turns it into a [`NewCost`].
///
/// Rules are checked in order: required fields, category, then the date.
/// The date must exist on the calendar, so February 29th is only accepted
/// in leap years.
pub fn validate_create_cost(
    request: &CreateCostRequest,
    bounds: YearBounds,
) -> Result<NewCost, ValidationError> {
    let missing: Vec<&'static str> = [
        ("user_id", request.user_id.is_none()),
        ("year", request.year.is_none()),
        ("month", request.month.is_none()),
        ("day", request.day.is_none()),
        ("description", request.description.is_none()),
        ("category", request.category.is_none()),
        ("sum", request.sum.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, is_missing)| is_missing.then_some(field))
    .collect();

    let (
        Some(user_id),
        Some(year),
        Some(month),
        Some(day),
        Some(description),
        Some(category),
        Some(sum),
    ) = (
        request.user_id,
        request.year,
        request.month,
        request.day,
        request.description.as_ref(),
        request.category.as_ref(),
        request.sum,
    )
    else {
        return Err(ValidationError::MissingField(missing));
    };

    let category: Category = category.parse()?;
    let year = bounds.check(year)?;
    let month = check_month(month)?;
    let day = check_day(year, month, day)?;

    Ok(NewCost {
        user_id,
        year,
        month,
        day,
        description: description.clone(),
        category,
        sum,
    })
}

/// Validates a report query and returns the report key it addresses.
pub fn validate_report_query(
    query: &ReportQuery,
    bounds: YearBounds,
) -> Result<ReportKey, ValidationError> {
    let (Some(user_id), Some(year), Some(month)) = (query.user_id, query.year, query.month) else {
        let missing = [
            ("user_id", query.user_id.is_none()),
            ("year", query.year.is_none()),
            ("month", query.month.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, is_missing)| is_missing.then_some(field))
        .collect();
        return Err(ValidationError::MissingField(missing));
    };

    let year = bounds.check(year)?;
    let month = check_month(month)?;

    Ok(ReportKey::new(user_id, year, month))
}

fn check_month(month: i64) -> Result<u32, ValidationError> {
    u32::try_from(month)
        .ok()
        .filter(|month| (1..=12).contains(month))
        .ok_or_else(|| ValidationError::InvalidDate("month must be between 1 and 12".to_string()))
}

fn check_day(year: i32, month: u32, day: i64) -> Result<u32, ValidationError> {
    u32::try_from(day)
        .ok()
        .filter(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .ok_or_else(|| {
            ValidationError::InvalidDate(format!(
                "day {day} does not exist in {year}-{month:02}"
            ))
        })
}
