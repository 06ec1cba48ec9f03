// Mapping of pipeline failures to HTTP responses
use crate::application::error::PipelineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            PipelineError::Unreadable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNREADABLE_SPREADSHEET"),
            PipelineError::MissingSheet { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_SHEET"),
            PipelineError::MissingColumn { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_COLUMN"),
            PipelineError::InvalidConfig(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_CONFIG"),
            PipelineError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED"),
        };

        if self.is_input_error() {
            tracing::warn!("Rejected upload: {}", self);
        } else {
            tracing::error!("Pipeline failure: {}", self);
        }

        let body = ErrorResponse {
            error,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
