use thiserror::Error;

use costwatch_core::costs::ValidationError;
use costwatch_core::storage::RepositoryError;

/// Errors surfaced by the report and cost services.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// The caller sent something invalid. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A store call failed.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_transparent() {
        let error = ServiceError::from(ValidationError::InvalidDate("bad".to_string()));
        assert_eq!(error.to_string(), "Invalid date: bad");

        let error = ServiceError::from(RepositoryError::QueryFailed("boom".to_string()));
        assert_eq!(error.to_string(), "Query failed: boom");
    }
}
