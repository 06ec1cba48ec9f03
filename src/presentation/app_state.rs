// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::export_service::ExportService;
use crate::infrastructure::config::PipelineConfig;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
    pub pipeline_config: PipelineConfig,
    pub export_file_name: String,
}
