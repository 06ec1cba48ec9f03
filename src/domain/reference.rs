// Reference sheets joined onto the inventory

#[derive(Debug, Clone, PartialEq)]
pub struct PositionEntry {
    pub code: String,
    pub description: Option<String>,
}

/// Position code to human-readable position.
#[derive(Debug, Clone, Default)]
pub struct PositionLegend {
    pub entries: Vec<PositionEntry>,
}

impl PositionLegend {
    pub fn new(entries: Vec<PositionEntry>) -> Self {
        Self { entries }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreadReferenceEntry {
    pub life_stage: Option<String>,
    pub model: Option<String>,
    pub tread_mm: Option<f64>,
}

impl TreadReferenceEntry {
    pub fn new(life_stage: Option<&str>, model: Option<&str>, tread_mm: Option<f64>) -> Self {
        Self {
            life_stage: life_stage.map(str::to_string),
            model: model.map(str::to_string),
            tread_mm,
        }
    }
}

/// Initial tread depth per (life-stage, model), as found in the sheet.
#[derive(Debug, Clone, Default)]
pub struct TreadReference {
    pub entries: Vec<TreadReferenceEntry>,
}

impl TreadReference {
    pub fn new(entries: Vec<TreadReferenceEntry>) -> Self {
        Self { entries }
    }

    /// Every numeric tread value, in sheet order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().filter_map(|e| e.tread_mm)
    }
}
