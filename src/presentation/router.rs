// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{create_dashboard, export_csv, health_check, pipeline_config};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards", post(create_dashboard))
        .route("/exports/pneus.csv", post(export_csv))
        .route("/pipeline-config", get(pipeline_config))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::dashboard_service::tests::FixedReader;
    use crate::application::export_service::ExportService;
    use crate::application::pipeline::TirePipeline;
    use crate::application::pipeline::tests::{inventory_row, workbook};
    use crate::domain::workbook::{CellValue, Workbook};
    use crate::infrastructure::config::PipelineConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn app(workbook: Workbook) -> Router {
        let config = PipelineConfig::default();
        let reader = Arc::new(FixedReader(workbook));
        let pipeline = Arc::new(TirePipeline::new(config.clone()).unwrap());
        let state = Arc::new(AppState {
            dashboard_service: DashboardService::new(reader.clone(), pipeline.clone()),
            export_service: ExportService::new(reader, pipeline),
            pipeline_config: config,
            export_file_name: "pneus_filtrados.csv".to_string(),
        });
        build_router(state, 1024 * 1024)
    }

    fn fleet() -> Workbook {
        workbook(
            vec![
                inventory_row("P-001", "SCANIA TRUCK 6x2", "5,0", "Caminhão"),
                inventory_row("P-002", "VW SAVEIRO 1.6", "1,0", "Estoque"),
            ],
            vec![vec!["NOVO".into(), "x".into(), CellValue::Number(15.0)]],
        )
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(fleet())
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let response = app(fleet())
            .oneshot(Request::post("/dashboards").body(Body::from("xlsx")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["title"], "Gestão de Pneus");
        assert_eq!(body["tiles"][0]["id"], "total");
        assert_eq!(body["tiles"][0]["value"], 2.0);
        assert_eq!(body["tables"][0]["rows"][1]["highlight"], "critical");
    }

    #[tokio::test]
    async fn test_dashboard_brotli() {
        let response = app(fleet())
            .oneshot(
                Request::post("/dashboards")
                    .header(header::ACCEPT_ENCODING, "br")
                    .body(Body::from("xlsx"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }

    #[tokio::test]
    async fn test_missing_sheet_is_unprocessable() {
        let response = app(Workbook::default())
            .oneshot(Request::post("/dashboards").body(Body::from("xlsx")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "MISSING_SHEET");
        assert!(body["message"].as_str().unwrap().contains("pneus"));
    }

    #[tokio::test]
    async fn test_filtered_csv_export() {
        let response = app(fleet())
            .oneshot(
                Request::post("/exports/pneus.csv?condition=critical")
                    .body(Body::from("xlsx"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_DISPOSITION]
                .to_str()
                .unwrap()
                .starts_with("attachment;")
        );

        let text = body_text(response).await;
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("P-002"));
    }

    #[tokio::test]
    async fn test_unknown_condition_rejected() {
        let response = app(fleet())
            .oneshot(
                Request::post("/exports/pneus.csv?condition=worn")
                    .body(Body::from("xlsx"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_limit() {
        let config = PipelineConfig::default();
        let reader = Arc::new(FixedReader(fleet()));
        let pipeline = Arc::new(TirePipeline::new(config.clone()).unwrap());
        let state = Arc::new(AppState {
            dashboard_service: DashboardService::new(reader.clone(), pipeline.clone()),
            export_service: ExportService::new(reader, pipeline),
            pipeline_config: config,
            export_file_name: "pneus.csv".to_string(),
        });
        let response = build_router(state, 8)
            .oneshot(
                Request::post("/dashboards")
                    .body(Body::from(vec![0u8; 64]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_pipeline_config_as_toml() {
        let response = app(fleet())
            .oneshot(Request::get("/pipeline-config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        assert!(text.contains("critical_mm = 2.0"));
    }
}
