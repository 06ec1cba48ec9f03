// Tire inventory domain models
use crate::domain::workbook::CellValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the inventory sheet, with every configured column coerced.
///
/// `raw` keeps the original cells in sheet order so exports can reproduce
/// them untouched.
#[derive(Debug, Clone, Default)]
pub struct TireRecord {
    pub reference: Option<String>,
    pub plate: Option<String>,
    pub vehicle_description: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub life_stage: Option<String>,
    pub status: Option<String>,
    pub position_code: Option<String>,
    pub measured_tread_mm: Option<f64>,
    pub initial_odometer_km: Option<f64>,
    pub observation: Option<String>,
    pub life_distance_km: Option<f64>,
    pub raw: Vec<CellValue>,
}

/// Which fallback stage produced the initial tread depth of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialTreadSource {
    Exact,
    NewModel,
    ModelMedian,
    LifeStageMedian,
    GlobalMedian,
    Unresolved,
}

impl InitialTreadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitialTreadSource::Exact => "exact",
            InitialTreadSource::NewModel => "new_model",
            InitialTreadSource::ModelMedian => "model_median",
            InitialTreadSource::LifeStageMedian => "life_stage_median",
            InitialTreadSource::GlobalMedian => "global_median",
            InitialTreadSource::Unresolved => "unresolved",
        }
    }
}

/// Tread depth band used for alerts and coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreadCondition {
    Critical,
    Warning,
    Ok,
}

impl TreadCondition {
    pub const ALL: [TreadCondition; 3] = [
        TreadCondition::Critical,
        TreadCondition::Warning,
        TreadCondition::Ok,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TreadCondition::Critical => "critical",
            TreadCondition::Warning => "warning",
            TreadCondition::Ok => "ok",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TreadCondition::Critical => "#FF6B6B",
            TreadCondition::Warning => "#FFD93D",
            TreadCondition::Ok => "#6BCB77",
        }
    }
}

impl fmt::Display for TreadCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inventory record plus every derived wear metric.
#[derive(Debug, Clone)]
pub struct EnrichedTireRecord {
    pub record: TireRecord,
    pub observation_km: Option<f64>,
    pub observation_date: Option<NaiveDate>,
    pub distance_km: Option<f64>,
    pub position: Option<String>,
    pub initial_tread_mm: Option<f64>,
    pub initial_tread_source: InitialTreadSource,
    pub consumed_tread_mm: Option<f64>,
    pub wear_mm_per_km: Option<f64>,
    pub tread_condition: Option<TreadCondition>,
    pub vehicle_type: String,
}
