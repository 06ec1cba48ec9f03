// HTTP request handlers
use crate::application::error::PipelineError;
use crate::application::export::ExportFilter;
use crate::infrastructure::http_response::{accepts_brotli, csv_attachment, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Build the dashboard for an uploaded spreadsheet
pub async fn create_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    // Check if client accepts Brotli compression
    let compress = accepts_brotli(headers.get(header::ACCEPT_ENCODING));

    let service = state.dashboard_service.clone();
    let dashboard = match run_blocking(move || service.get_dashboard(&body)).await {
        Ok(dashboard) => dashboard,
        Err(response) => return response,
    };

    match json_response(&dashboard, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Download the enriched table as CSV, optionally filtered
pub async fn export_csv(
    Query(filter): Query<ExportFilter>,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let service = state.export_service.clone();
    let csv = match run_blocking(move || service.export_csv(&body, &filter)).await {
        Ok(csv) => csv,
        Err(response) => return response,
    };

    match csv_attachment(csv, &state.export_file_name) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Effective pipeline configuration, as TOML
pub async fn pipeline_config(State(state): State<Arc<AppState>>) -> Response {
    match state.pipeline_config.to_toml() {
        Ok(toml) => ([(header::CONTENT_TYPE, "application/toml; charset=utf-8")], toml).into_response(),
        Err(e) => {
            tracing::error!("Failed to render pipeline config: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// The pipeline is synchronous and CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(job: F) -> Result<T, Response>
where
    F: FnOnce() -> Result<T, PipelineError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.into_response()),
        Err(e) => {
            tracing::error!("Pipeline task failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}
