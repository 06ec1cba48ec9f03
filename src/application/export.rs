// Enriched table rendering shared by the full-table view and the CSV download
use crate::application::normalizer::{normalize_key, optional_key};
use crate::application::pipeline::PipelineOutput;
use crate::domain::tire::{EnrichedTireRecord, TreadCondition};
use serde::Deserialize;
use std::collections::HashSet;

pub const DERIVED_COLUMNS: [&str; 10] = [
    "Observação - Km",
    "Data Observação",
    "Km Rodado até Aferição",
    "Posição",
    "Sulco Inicial",
    "Origem Sulco Inicial",
    "Sulco Consumido",
    "Desgaste (mm/km)",
    "Condição Sulco",
    "Tipo Veículo",
];

/// Download filter; every field left empty matches all records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportFilter {
    pub status: Option<String>,
    pub vehicle_type: Option<String>,
    pub condition: Option<TreadCondition>,
}

impl ExportFilter {
    pub fn matches(&self, record: &EnrichedTireRecord) -> bool {
        let same_key = |wanted: &Option<String>, actual: Option<&str>| match optional_key(wanted.as_deref()) {
            Some(wanted) => optional_key(actual).as_ref() == Some(&wanted),
            None => true,
        };

        same_key(&self.status, record.record.status.as_deref())
            && same_key(&self.vehicle_type, Some(record.vehicle_type.as_str()))
            && self
                .condition
                .is_none_or(|c| record.tread_condition == Some(c))
    }
}

/// Original inventory columns followed by the derived ones.
///
/// A derived name already used by the inventory gets a " (calculado)" suffix,
/// numbered if that is taken too, so the header never repeats a name.
pub fn table_columns(output: &PipelineOutput) -> Vec<String> {
    let mut columns = output.columns.clone();
    let mut taken: HashSet<String> = columns.iter().map(|c| normalize_key(c)).collect();

    for name in DERIVED_COLUMNS {
        let mut candidate = name.to_string();
        let mut attempt = 1;
        while !taken.insert(normalize_key(&candidate)) {
            candidate = match attempt {
                1 => format!("{} (calculado)", name),
                n => format!("{} (calculado {})", name, n),
            };
            attempt += 1;
        }
        columns.push(candidate);
    }
    columns
}

pub fn table_row(columns: usize, record: &EnrichedTireRecord) -> Vec<String> {
    let mut cells: Vec<String> = (0..columns)
        .map(|idx| record.record.raw.get(idx).map(|c| c.to_string()).unwrap_or_default())
        .collect();

    cells.extend([
        plain_number(record.observation_km),
        record
            .observation_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default(),
        plain_number(record.distance_km),
        record.position.clone().unwrap_or_default(),
        plain_number(record.initial_tread_mm),
        record.initial_tread_source.as_str().to_string(),
        plain_number(record.consumed_tread_mm),
        plain_number(record.wear_mm_per_km),
        record
            .tread_condition
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
        record.vehicle_type.clone(),
    ]);
    cells
}

/// Rows of the enriched table that pass `filter`.
pub fn filtered_rows(output: &PipelineOutput, filter: &ExportFilter) -> Vec<Vec<String>> {
    output
        .records
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| table_row(output.columns.len(), r))
        .collect()
}

fn plain_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::TirePipeline;
    use crate::application::pipeline::tests::{inventory_header, inventory_row, workbook};
    use crate::domain::workbook::CellValue;
    use crate::infrastructure::config::PipelineConfig;

    fn output() -> PipelineOutput {
        let workbook = workbook(
            vec![
                inventory_row("P-001", "SCANIA TRUCK 6x2", "5,0", "Caminhão"),
                inventory_row("P-002", "VW SAVEIRO", "1,0", "Estoque"),
            ],
            vec![vec!["Novo".into(), "X".into(), CellValue::Number(15.0)]],
        );
        TirePipeline::new(PipelineConfig::default())
            .unwrap()
            .run(&workbook)
            .unwrap()
    }

    #[test]
    fn test_columns_keep_source_order() {
        let columns = table_columns(&output());
        assert_eq!(&columns[..10], inventory_header().as_slice());
        assert_eq!(&columns[10..], DERIVED_COLUMNS.map(String::from).as_slice());
    }

    #[test]
    fn test_row_keeps_raw_cells_unaltered() {
        let output = output();
        let row = table_row(output.columns.len(), &output.records[0]);
        assert_eq!(row[0], "P-001");
        assert_eq!(row[7], "5,0");
        assert_eq!(row[8], "100000");
        assert_eq!(row[10], "115000");
        assert_eq!(row[11], "01/01/2025");
        assert_eq!(row[12], "15000");
        assert_eq!(row[13], "Dianteiro Direito Interno");
        assert_eq!(row[14], "15");
        assert_eq!(row[15], "exact");
        assert_eq!(row[16], "10");
        assert_eq!(row[18], "ok");
        assert_eq!(row[19], "Truck");
    }

    #[test]
    fn test_filters_compare_normalized_keys() {
        let output = output();
        let by_status = ExportFilter {
            status: Some("caminhao".to_string()),
            ..ExportFilter::default()
        };
        assert_eq!(filtered_rows(&output, &by_status).len(), 1);

        let by_condition = ExportFilter {
            condition: Some(TreadCondition::Critical),
            ..ExportFilter::default()
        };
        let rows = filtered_rows(&output, &by_condition);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "P-002");

        let by_vehicle = ExportFilter {
            vehicle_type: Some("LEVE".to_string()),
            status: Some("Caminhão".to_string()),
            condition: None,
        };
        assert!(filtered_rows(&output, &by_vehicle).is_empty());

        assert_eq!(filtered_rows(&output, &ExportFilter::default()).len(), 2);
    }

    #[test]
    fn test_derived_names_never_repeat_inventory_columns() {
        let mut output = output();
        output.columns.extend([
            "POSICAO".to_string(),
            "Tipo Veículo".to_string(),
            "Tipo Veículo (calculado)".to_string(),
        ]);

        let columns = table_columns(&output);
        let derived = &columns[13..];
        assert_eq!(derived.len(), DERIVED_COLUMNS.len());
        assert_eq!(derived[0], "Observação - Km");
        assert_eq!(derived[3], "Posição (calculado)");
        assert_eq!(derived[9], "Tipo Veículo (calculado 2)");

        let unique: HashSet<String> = columns.iter().map(|c| normalize_key(c)).collect();
        assert_eq!(unique.len(), columns.len());
    }
}
