// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use crate::application::dashboard_service::DashboardService;
use crate::application::export_service::ExportService;
use crate::application::pipeline::TirePipeline;
use crate::infrastructure::calamine_reader::CalamineReader;
use crate::infrastructure::config::{load_pipeline_config, load_server_config};
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration; TIRES_PROFILE selects a fleet-specific override file
    let server_config = load_server_config()?;
    let profile = std::env::var("TIRES_PROFILE").ok();
    let pipeline_config = load_pipeline_config(profile.as_deref())?;

    // Spreadsheet parsing (infrastructure layer)
    let reader = Arc::new(CalamineReader::new());

    // Pipeline and services (application layer)
    let pipeline = Arc::new(TirePipeline::new(pipeline_config.clone())?);
    let dashboard_service = DashboardService::new(reader.clone(), pipeline.clone());
    let export_service = ExportService::new(reader, pipeline);

    let state = Arc::new(AppState {
        dashboard_service,
        export_service,
        pipeline_config,
        export_file_name: server_config.server.export_file_name.clone(),
    });

    // Build router (presentation layer)
    let router = build_router(state, server_config.server.max_upload_bytes());

    let addr: SocketAddr = format!("{}:{}", server_config.server.host, server_config.server.port).parse()?;
    tracing::info!(
        "Starting tire-wear-dashboard on {} (profile: {})",
        addr,
        profile.as_deref().unwrap_or("default")
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
