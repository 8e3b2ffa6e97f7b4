use thiserror::Error;

/// Errors raised while validating caller input.
///
/// All of these are client errors and are reported before anything is
/// written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingField(Vec<&'static str>),
    #[error("Invalid category '{0}', expected one of: food, health, housing, sport, education, transportation, other")]
    InvalidCategory(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
