// Tread-wear pipeline - one pass from a parsed workbook to the enriched table
use crate::application::error::PipelineError;
use crate::application::normalizer::{to_number, to_text};
use crate::application::observation::ObservationExtractor;
use crate::application::reference_resolver::ReferenceResolver;
use crate::application::schema::{InventoryLayout, PositionLayout, TreadReferenceLayout, find_sheet};
use crate::application::summary::summarize;
use crate::application::vehicle_classifier::VehicleClassifier;
use crate::application::wear_calculator::WearCalculator;
use crate::domain::reference::{PositionEntry, PositionLegend, TreadReference, TreadReferenceEntry};
use crate::domain::summary::FleetSummary;
use crate::domain::tire::{EnrichedTireRecord, InitialTreadSource, TireRecord};
use crate::domain::workbook::{CellValue, Sheet, Workbook};
use crate::infrastructure::config::PipelineConfig;
use std::collections::HashMap;

/// Everything derived from one upload.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Inventory header, in sheet order.
    pub columns: Vec<String>,
    pub records: Vec<EnrichedTireRecord>,
    pub positions: PositionLegend,
    pub tread_reference: TreadReference,
    pub summary: FleetSummary,
}

pub struct TirePipeline {
    config: PipelineConfig,
    extractor: ObservationExtractor,
    classifier: VehicleClassifier,
    calculator: WearCalculator,
}

impl TirePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::InvalidConfig)?;

        Ok(Self {
            extractor: ObservationExtractor::new(),
            classifier: VehicleClassifier::new(&config.vehicle_types),
            calculator: WearCalculator::new(config.thresholds),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, workbook: &Workbook) -> Result<PipelineOutput, PipelineError> {
        // Structure first: nothing is computed unless every sheet and required column exists.
        let inventory_sheet = find_sheet(workbook, &self.config.sheets.inventory)?;
        let positions_sheet = find_sheet(workbook, &self.config.sheets.positions)?;
        let treads_sheet = find_sheet(workbook, &self.config.sheets.tread_reference)?;

        let inventory_layout = InventoryLayout::resolve(inventory_sheet, &self.config.inventory)?;
        let positions_layout = PositionLayout::resolve(positions_sheet, &self.config.positions)?;
        let treads_layout = TreadReferenceLayout::resolve(treads_sheet, &self.config.tread_reference)?;

        let positions = read_positions(positions_sheet, &positions_layout);
        let tread_reference = read_tread_reference(treads_sheet, &treads_layout);
        let resolver = ReferenceResolver::new(&positions, &tread_reference, &self.config.new_life_stage);

        let records: Vec<EnrichedTireRecord> = read_inventory(inventory_sheet, &inventory_layout)
            .into_iter()
            .map(|record| self.enrich(record, &resolver))
            .collect();

        log_resolution_stats(&records);

        let summary = summarize(&records, &self.config.status_offsets);
        tracing::info!(
            "Processed {} tire records ({} positions, {} tread references, {} below {} mm)",
            records.len(),
            positions.entries.len(),
            tread_reference.entries.len(),
            summary.critical_count,
            self.config.thresholds.critical_mm
        );

        Ok(PipelineOutput {
            columns: inventory_sheet.header.clone(),
            records,
            positions,
            tread_reference,
            summary,
        })
    }

    fn enrich(&self, record: TireRecord, resolver: &ReferenceResolver) -> EnrichedTireRecord {
        let observation = record.observation.as_deref();
        let observation_km = self.extractor.extract_distance(observation);
        let observation_date = self.extractor.extract_date(observation);
        let distance_km = self.calculator.distance_travelled(
            record.life_distance_km,
            observation_km,
            record.initial_odometer_km,
        );

        let position = resolver.resolve_position(record.position_code.as_deref());
        let (initial_tread_mm, initial_tread_source) =
            resolver.resolve_initial_tread(record.life_stage.as_deref(), record.model.as_deref());

        let consumed_tread_mm = self
            .calculator
            .consumed_tread(initial_tread_mm, record.measured_tread_mm);
        let wear_mm_per_km = self.calculator.wear_rate(consumed_tread_mm, distance_km);
        let tread_condition = self.calculator.condition(record.measured_tread_mm);
        let vehicle_type = self
            .classifier
            .classify(record.vehicle_description.as_deref())
            .to_string();

        EnrichedTireRecord {
            record,
            observation_km,
            observation_date,
            distance_km,
            position,
            initial_tread_mm,
            initial_tread_source,
            consumed_tread_mm,
            wear_mm_per_km,
            tread_condition,
            vehicle_type,
        }
    }
}

fn text_at(row: &[CellValue], column: Option<usize>) -> Option<String> {
    to_text(Sheet::cell(row, column))
}

fn number_at(row: &[CellValue], column: Option<usize>) -> Option<f64> {
    to_number(Sheet::cell(row, column))
}

fn non_blank_rows(sheet: &Sheet) -> impl Iterator<Item = &Vec<CellValue>> {
    sheet
        .rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_blank()))
}

fn read_positions(sheet: &Sheet, layout: &PositionLayout) -> PositionLegend {
    let entries = non_blank_rows(sheet)
        .filter_map(|row| {
            Some(PositionEntry {
                code: text_at(row, layout.code)?,
                description: text_at(row, layout.description),
            })
        })
        .collect();
    PositionLegend::new(entries)
}

fn read_tread_reference(sheet: &Sheet, layout: &TreadReferenceLayout) -> TreadReference {
    let entries = non_blank_rows(sheet)
        .map(|row| TreadReferenceEntry {
            life_stage: text_at(row, layout.life_stage),
            model: text_at(row, layout.model),
            tread_mm: number_at(row, layout.tread),
        })
        .collect();
    TreadReference::new(entries)
}

fn read_inventory(sheet: &Sheet, layout: &InventoryLayout) -> Vec<TireRecord> {
    non_blank_rows(sheet)
        .map(|row| TireRecord {
            reference: text_at(row, layout.reference),
            plate: text_at(row, layout.plate),
            vehicle_description: text_at(row, layout.vehicle_description),
            brand: text_at(row, layout.brand),
            model: text_at(row, layout.model),
            life_stage: text_at(row, layout.life_stage),
            status: text_at(row, layout.status),
            position_code: text_at(row, layout.position_code),
            measured_tread_mm: number_at(row, layout.measured_tread),
            initial_odometer_km: number_at(row, layout.initial_odometer),
            observation: text_at(row, layout.observation),
            life_distance_km: number_at(row, layout.life_distance),
            raw: row.clone(),
        })
        .collect()
}

fn log_resolution_stats(records: &[EnrichedTireRecord]) {
    let mut by_source: HashMap<InitialTreadSource, usize> = HashMap::new();
    for record in records {
        *by_source.entry(record.initial_tread_source).or_default() += 1;
    }

    for (source, count) in &by_source {
        tracing::debug!("Initial tread resolved by {}: {} records", source.as_str(), count);
    }

    if let Some(unresolved) = by_source.get(&InitialTreadSource::Unresolved) {
        tracing::warn!(
            "{} records have no initial tread reference; wear metrics left empty",
            unresolved
        );
    }
}
