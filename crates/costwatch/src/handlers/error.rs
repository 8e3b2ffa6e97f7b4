use axum::{
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use costwatch_core::storage::repository_error_to_status_code;

use crate::services::ServiceError;

/// Error returned by every API handler.
///
/// Client errors carry their message. Store failures are logged and answered
/// with the status reason only.
#[derive(Debug)]
pub enum ApiError {
    /// The request body or query string could not be parsed.
    BadRequest(String),
    /// A service call failed.
    Service(ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => {
                tracing::warn!(%message, "Rejected malformed request");
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::Service(ServiceError::Validation(err)) => {
                tracing::warn!(error = %err, "Validation failed");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Service(ServiceError::Store(err)) => {
                let status = StatusCode::from_u16(repository_error_to_status_code(&err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                tracing::error!(%status, error = %err, "Store call failed");
                let reason = status
                    .canonical_reason()
                    .unwrap_or("Internal Server Error")
                    .to_string();
                (status, reason)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Failed to parse JSON body: {}", rejection.body_text()))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(format!("Failed to parse form: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Failed to parse query: {}", rejection.body_text()))
    }
}
