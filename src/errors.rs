use crate::models::FieldError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Failures raised by the pipeline stages.
///
/// These never cross the HTTP boundary: the estimator retries the stage once
/// and then turns a persistent failure into a degraded `VoyageResult`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StageFailure {
    #[error("no route configured between '{start}' and '{end}'")]
    RouteNotFound { start: String, end: String },
    #[error("configured distance {0} nm is not positive")]
    InvalidDistance(f64),
    #[error("invalid fuel inputs: {0}")]
    InvalidFuelInputs(String),
    #[error("freight income is zero")]
    ZeroFreightIncome,
    #[error("total expense is zero")]
    ZeroExpense,
    #[error("decision engine failure: {0}")]
    DecisionEngineFailure(String),
}

/// Application-specific error types for the HTTP boundary.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Request failed field-level validation.
    Validation(Vec<FieldError>),
    /// Bad request error (malformed body).
    BadRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation failed: {}", names.join(", "))
            }
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to a status code and JSON body, logging by severity.
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(fields) => {
                tracing::info!("Rejected request with {} invalid field(s)", fields.len());
                let body = Json(json!({
                    "error": "Validation failed",
                    "fields": fields,
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_unprocessable_entity() {
        let err = AppError::Validation(vec![FieldError::new("fuel_price", "Fuel price cannot be zero")]);
        assert_eq!(err.to_string(), "Validation failed: fuel_price");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_bad_request_carries_message() {
        let err = AppError::BadRequest("expected value".to_string());
        assert_eq!(err.to_string(), "Bad request: expected value");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_stage_failure_messages() {
        let failure = StageFailure::RouteNotFound {
            start: "atlantis".to_string(),
            end: "lemuria".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "no route configured between 'atlantis' and 'lemuria'"
        );
        assert_eq!(StageFailure::ZeroExpense.to_string(), "total expense is zero");
    }
}
