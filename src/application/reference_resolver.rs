// Reference resolver - joins the position legend and the tread reference onto tire records
use crate::application::normalizer::{normalize_key, optional_key};
use crate::domain::reference::{PositionLegend, TreadReference};
use crate::domain::summary::median;
use crate::domain::tire::InitialTreadSource;
use std::collections::HashMap;

/// Lookup tables precomputed from the reference sheets.
///
/// Built once per upload from borrowed inputs; resolving never mutates it, so
/// repeated resolutions of the same record agree.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    positions: HashMap<String, Option<String>>,
    exact: HashMap<(String, String), f64>,
    new_by_model: HashMap<String, f64>,
    model_median: HashMap<String, f64>,
    life_stage_median: HashMap<String, f64>,
    global_median: Option<f64>,
    new_life_stage: String,
}

impl ReferenceResolver {
    pub fn new(positions: &PositionLegend, treads: &TreadReference, new_life_stage: &str) -> Self {
        let new_life_stage = normalize_key(new_life_stage);

        let mut position_map = HashMap::new();
        for entry in &positions.entries {
            if let Some(code) = optional_key(Some(entry.code.as_str())) {
                position_map
                    .entry(code)
                    .or_insert_with(|| entry.description.clone());
            }
        }

        let mut exact = HashMap::new();
        let mut new_by_model = HashMap::new();
        let mut by_model: HashMap<String, Vec<f64>> = HashMap::new();
        let mut by_life_stage: HashMap<String, Vec<f64>> = HashMap::new();

        // Rows without a numeric tread value cannot anchor any stage.
        for entry in &treads.entries {
            let Some(tread) = entry.tread_mm else {
                continue;
            };
            let stage = optional_key(entry.life_stage.as_deref());
            let model = optional_key(entry.model.as_deref());

            if let (Some(stage), Some(model)) = (&stage, &model) {
                exact.entry((stage.clone(), model.clone())).or_insert(tread);
                if *stage == new_life_stage {
                    new_by_model.entry(model.clone()).or_insert(tread);
                }
            }
            if let Some(model) = model {
                by_model.entry(model).or_default().push(tread);
            }
            if let Some(stage) = stage {
                by_life_stage.entry(stage).or_default().push(tread);
            }
        }

        let medians = |groups: HashMap<String, Vec<f64>>| -> HashMap<String, f64> {
            groups
                .into_iter()
                .filter_map(|(key, values)| median(values).map(|m| (key, m)))
                .collect()
        };

        Self {
            positions: position_map,
            exact,
            new_by_model,
            model_median: medians(by_model),
            life_stage_median: medians(by_life_stage),
            global_median: median(treads.values()),
            new_life_stage,
        }
    }

    /// Human-readable position for a code; unknown codes stay missing.
    pub fn resolve_position(&self, code: Option<&str>) -> Option<String> {
        let key = optional_key(code)?;
        self.positions.get(&key).cloned().flatten()
    }

    /// Initial tread depth through the fallback chain, most specific first.
    pub fn resolve_initial_tread(
        &self,
        life_stage: Option<&str>,
        model: Option<&str>,
    ) -> (Option<f64>, InitialTreadSource) {
        let stage = optional_key(life_stage);
        let model = optional_key(model);

        if let (Some(stage), Some(model)) = (&stage, &model) {
            if let Some(value) = self.exact.get(&(stage.clone(), model.clone())) {
                return (Some(*value), InitialTreadSource::Exact);
            }
            // With normalized keys every hit here is already a hit in `exact`.
            if *stage == self.new_life_stage {
                if let Some(value) = self.new_by_model.get(model) {
                    return (Some(*value), InitialTreadSource::NewModel);
                }
            }
        }

        if let Some(value) = model.as_ref().and_then(|m| self.model_median.get(m)) {
            return (Some(*value), InitialTreadSource::ModelMedian);
        }

        if let Some(value) = stage.as_ref().and_then(|s| self.life_stage_median.get(s)) {
            return (Some(*value), InitialTreadSource::LifeStageMedian);
        }

        match self.global_median {
            Some(value) => (Some(value), InitialTreadSource::GlobalMedian),
            None => (None, InitialTreadSource::Unresolved),
        }
    }
}
