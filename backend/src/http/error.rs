//! HTTP error handling and response types.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request that never reached an evaluator
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Evaluation error
    Simulation(SimError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_INPUT", msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Simulation(e) => {
                let status = match &e {
                    SimError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                    SimError::Infeasible { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    SimError::Configuration { .. } | SimError::Solver { .. } => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let context = e.context().to_string();
                let mut error = ApiError::new(e.code(), e.message());
                if !context.is_empty() {
                    error = error.with_details(context);
                }
                (status, error)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        AppError::Simulation(err)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorContext;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SimError::invalid_input("bad hours"), StatusCode::BAD_REQUEST),
            (
                SimError::infeasible("no schedule"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SimError::solver("iteration limit"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_api_error_skips_empty_details() {
        let json = serde_json::to_value(ApiError::new("INVALID_INPUT", "bad")).unwrap();
        assert!(json.get("details").is_none());

        let ctx = ErrorContext::new("pricing.cost").with_parameter("hours");
        let err = SimError::invalid_input_with_context("bad", ctx);
        assert_eq!(
            AppError::from(err).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
