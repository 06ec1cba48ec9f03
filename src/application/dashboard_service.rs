// Dashboard service - Use case for building the fleet dashboard from an upload
use crate::application::error::PipelineError;
use crate::application::export::{ExportFilter, filtered_rows, table_columns};
use crate::application::normalizer::normalize_key;
use crate::application::pipeline::{PipelineOutput, TirePipeline};
use crate::application::spreadsheet_reader::SpreadsheetReader;
use crate::domain::dashboard::Dashboard;
use crate::domain::summary::FleetSummary;
use crate::domain::widgets::{
    CategoryPoint, ChartData, ChartKind, SeriesData, TableData, TableRow, TileData,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    reader: Arc<dyn SpreadsheetReader>,
    pipeline: Arc<TirePipeline>,
}

impl DashboardService {
    pub fn new(reader: Arc<dyn SpreadsheetReader>, pipeline: Arc<TirePipeline>) -> Self {
        Self { reader, pipeline }
    }

    pub fn get_dashboard(&self, bytes: &[u8]) -> Result<Dashboard, PipelineError> {
        let workbook = self.reader.read_workbook(bytes)?;
        let output = self.pipeline.run(&workbook)?;

        let tiles = self.build_tiles(&output.summary);
        let charts = self.build_charts(&output.summary);
        let tables = self.build_tables(&output);

        Ok(Dashboard::new(
            self.pipeline.config().title.clone(),
            tiles,
            charts,
            tables,
        ))
    }

    fn build_tiles(&self, summary: &FleetSummary) -> Vec<TileData> {
        let critical_mm = self.pipeline.config().thresholds.critical_mm;
        let mut tiles = vec![tile("total", "Total de pneus", "pneus", summary.total as f64, 0)];

        for status in &summary.status_counts {
            tiles.push(tile(
                &format!("status-{}", slug(&status.status)),
                &status.status,
                "pneus",
                status.adjusted() as f64,
                0,
            ));
        }

        // Indicators without data are left out
        if let Some(mean) = summary.mean_tread_mm {
            tiles.push(tile("mean-tread", "Sulco médio", "mm", mean, 2));
        }
        if let Some(mean) = summary.mean_distance_km {
            tiles.push(tile("mean-distance", "Km médio até aferição", "km", mean, 0));
        }

        tiles.push(tile(
            "critical-count",
            &format!("Pneus abaixo de {} mm", critical_mm),
            "pneus",
            summary.critical_count as f64,
            0,
        ));
        if let Some(pct) = summary.critical_pct {
            tiles.push(tile(
                "critical-pct",
                &format!("% abaixo de {} mm", critical_mm),
                "%",
                pct,
                1,
            ));
        }

        tiles
    }

    fn build_charts(&self, summary: &FleetSummary) -> Vec<ChartData> {
        let mut charts = Vec::new();

        let status_points: Vec<CategoryPoint> = summary
            .status_counts
            .iter()
            .map(|s| CategoryPoint::new(s.status.clone(), s.adjusted() as f64))
            .collect();
        push_chart(
            &mut charts,
            "status",
            "Pneus por status",
            None,
            ChartKind::Pie,
            Some(0),
            vec![series("count", "Pneus", None, status_points)],
        );

        let vehicle_points: Vec<CategoryPoint> = summary
            .vehicle_type_counts
            .iter()
            .map(|(label, count)| CategoryPoint::new(label.clone(), *count as f64))
            .collect();
        push_chart(
            &mut charts,
            "vehicle-types",
            "Pneus por tipo de veículo",
            None,
            ChartKind::Bar,
            Some(0),
            vec![series("count", "Pneus", None, vehicle_points)],
        );

        let condition_series: Vec<SeriesData> = summary
            .condition_counts
            .iter()
            .map(|(condition, count)| {
                series(
                    condition.as_str(),
                    condition.as_str(),
                    Some(condition.color()),
                    vec![CategoryPoint::new(condition.as_str(), *count as f64)],
                )
            })
            .collect();
        push_chart(
            &mut charts,
            "tread-condition",
            "Condição do sulco",
            None,
            ChartKind::Bar,
            Some(0),
            condition_series,
        );

        let wear_points: Vec<CategoryPoint> = summary
            .wear_by_vehicle_type
            .iter()
            .filter_map(|g| g.mean.map(|m| CategoryPoint::new(g.label.clone(), m)))
            .collect();
        push_chart(
            &mut charts,
            "wear-by-vehicle-type",
            "Desgaste médio por tipo de veículo",
            Some("mm/km"),
            ChartKind::Bar,
            Some(6),
            vec![series("wear", "Desgaste médio", None, wear_points)],
        );

        charts
    }

    fn build_tables(&self, output: &PipelineOutput) -> Vec<TableData> {
        let config = self.pipeline.config();
        let new_stage = normalize_key(&config.new_life_stage);

        let measurements = output
            .records
            .iter()
            .map(|r| TableRow {
                cells: vec![
                    r.record.reference.clone().unwrap_or_default(),
                    r.record.plate.clone().unwrap_or_default(),
                    r.vehicle_type.clone(),
                    r.position
                        .clone()
                        .or_else(|| r.record.position_code.clone())
                        .unwrap_or_default(),
                    format_number(r.record.measured_tread_mm, 1),
                    r.tread_condition.map(|c| c.as_str().to_string()).unwrap_or_default(),
                ],
                highlight: r.tread_condition,
            })
            .collect();

        let positions = output
            .positions
            .entries
            .iter()
            .map(|p| TableRow::plain(vec![p.code.clone(), p.description.clone().unwrap_or_default()]))
            .collect();

        let new_treads = output
            .tread_reference
            .entries
            .iter()
            .filter(|e| e.life_stage.as_deref().map(normalize_key).as_ref() == Some(&new_stage))
            .map(|e| {
                TableRow::plain(vec![
                    e.life_stage.clone().unwrap_or_default(),
                    e.model.clone().unwrap_or_default(),
                    format_number(e.tread_mm, 1),
                ])
            })
            .collect();

        let wear = output
            .summary
            .wear_by_vehicle_type
            .iter()
            .map(|g| {
                TableRow::plain(vec![
                    g.label.clone(),
                    g.count.to_string(),
                    format_number(g.mean, 6),
                ])
            })
            .collect();

        let full = filtered_rows(output, &ExportFilter::default())
            .into_iter()
            .map(TableRow::plain)
            .collect();

        vec![
            TableData::new(
                "tread-measurements",
                "Medidas de Sulco",
                columns(&["Referência", "Placa", "Tipo Veículo", "Posição", "Sulco (mm)", "Condição"]),
                measurements,
            ),
            TableData::new(
                "full-table",
                "Tabela Completa",
                table_columns(output),
                full,
            ),
            TableData::new(
                "position-legend",
                "Legenda - Siglas de Posição",
                columns(&["Sigla", "Posição"]),
                positions,
            ),
            TableData::new(
                "new-tread-legend",
                "Legenda - Sulco Inicial por Modelo de Pneu",
                columns(&["Vida", "Modelo", "Sulco (mm)"]),
                new_treads,
            ),
            TableData::new(
                "wear-by-vehicle-type",
                "Medida da Rodagem por Tipo de Veículo",
                columns(&["Tipo Veículo", "Pneus", "Desgaste (mm/km)"]),
                wear,
            ),
        ]
    }
}

fn tile(id: &str, title: &str, unit: &str, value: f64, precision: i32) -> TileData {
    TileData::new(id.to_string(), title.to_string(), unit.to_string(), value, precision)
}

fn series(id: &str, name: &str, color: Option<&str>, points: Vec<CategoryPoint>) -> SeriesData {
    SeriesData::new(id.to_string(), name.to_string(), color.map(str::to_string), points)
}

/// Only add a chart if it has at least one series with data
fn push_chart(
    charts: &mut Vec<ChartData>,
    id: &str,
    title: &str,
    unit: Option<&str>,
    kind: ChartKind,
    fraction_digits: Option<i32>,
    series: Vec<SeriesData>,
) {
    let series: Vec<SeriesData> = series.into_iter().filter(|s| !s.points.is_empty()).collect();
    if series.is_empty() {
        return;
    }
    charts.push(ChartData::new(
        id.to_string(),
        title.to_string(),
        unit.map(str::to_string),
        kind,
        fraction_digits,
        series,
    ));
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn slug(label: &str) -> String {
    normalize_key(label).to_lowercase().replace(['/', ' '], "-")
}

fn format_number(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_default()
}
