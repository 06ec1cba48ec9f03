// Sheet and column lookup, validated once before any row is processed
use crate::application::error::PipelineError;
use crate::application::normalizer::normalize_key;
use crate::domain::workbook::{Sheet, Workbook};
use crate::infrastructure::config::{ColumnSpec, InventoryColumns, PositionColumns, TreadReferenceColumns};

/// First sheet whose normalized name equals one of the aliases, in alias order.
pub fn find_sheet<'a>(workbook: &'a Workbook, aliases: &[String]) -> Result<&'a Sheet, PipelineError> {
    aliases
        .iter()
        .map(|alias| normalize_key(alias))
        .find_map(|key| workbook.sheets.iter().find(|s| normalize_key(&s.name) == key))
        .ok_or_else(|| PipelineError::MissingSheet {
            expected: aliases.first().cloned().unwrap_or_default(),
            available: workbook.sheet_names(),
        })
}

/// Index of the column; `Ok(None)` only for optional columns.
pub fn find_column(sheet: &Sheet, spec: &ColumnSpec) -> Result<Option<usize>, PipelineError> {
    let position = spec.aliases.iter().map(|alias| normalize_key(alias)).find_map(|key| {
        sheet
            .header
            .iter()
            .position(|h| !key.is_empty() && normalize_key(h) == key)
    });

    match position {
        None if spec.required => Err(PipelineError::MissingColumn {
            sheet: sheet.name.clone(),
            column: spec.display_name().to_string(),
        }),
        other => Ok(other),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryLayout {
    pub reference: Option<usize>,
    pub plate: Option<usize>,
    pub vehicle_description: Option<usize>,
    pub brand: Option<usize>,
    pub model: Option<usize>,
    pub life_stage: Option<usize>,
    pub status: Option<usize>,
    pub position_code: Option<usize>,
    pub measured_tread: Option<usize>,
    pub initial_odometer: Option<usize>,
    pub observation: Option<usize>,
    pub life_distance: Option<usize>,
}

impl InventoryLayout {
    pub fn resolve(sheet: &Sheet, columns: &InventoryColumns) -> Result<Self, PipelineError> {
        Ok(Self {
            reference: find_column(sheet, &columns.reference)?,
            plate: find_column(sheet, &columns.plate)?,
            vehicle_description: find_column(sheet, &columns.vehicle_description)?,
            brand: find_column(sheet, &columns.brand)?,
            model: find_column(sheet, &columns.model)?,
            life_stage: find_column(sheet, &columns.life_stage)?,
            status: find_column(sheet, &columns.status)?,
            position_code: find_column(sheet, &columns.position_code)?,
            measured_tread: find_column(sheet, &columns.measured_tread)?,
            initial_odometer: find_column(sheet, &columns.initial_odometer)?,
            observation: find_column(sheet, &columns.observation)?,
            life_distance: find_column(sheet, &columns.life_distance)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PositionLayout {
    pub code: Option<usize>,
    pub description: Option<usize>,
}

impl PositionLayout {
    pub fn resolve(sheet: &Sheet, columns: &PositionColumns) -> Result<Self, PipelineError> {
        Ok(Self {
            code: find_column(sheet, &columns.code)?,
            description: find_column(sheet, &columns.description)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreadReferenceLayout {
    pub life_stage: Option<usize>,
    pub model: Option<usize>,
    pub tread: Option<usize>,
}

impl TreadReferenceLayout {
    pub fn resolve(sheet: &Sheet, columns: &TreadReferenceColumns) -> Result<Self, PipelineError> {
        Ok(Self {
            life_stage: find_column(sheet, &columns.life_stage)?,
            model: find_column(sheet, &columns.model)?,
            tread: find_column(sheet, &columns.tread)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, header: &[&str]) -> Sheet {
        Sheet::new(name, header.iter().map(|h| h.to_string()).collect(), Vec::new())
    }

    #[test]
    fn test_sheet_names_tolerate_case_and_accents() {
        let workbook = Workbook::new(vec![sheet("PNEUS", &[]), sheet("Posicao ", &[])]);
        let found = find_sheet(&workbook, &["posição".to_string()]).unwrap();
        assert_eq!(found.name, "Posicao ");
    }

    #[test]
    fn test_missing_sheet_reports_available() {
        let workbook = Workbook::new(vec![sheet("pneus", &[])]);
        let err = find_sheet(&workbook, &["sulco".to_string()]).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingSheet {
                expected: "sulco".to_string(),
                available: vec!["pneus".to_string()],
            }
        );
    }

    #[test]
    fn test_column_aliases_in_order() {
        let sheet = sheet("sulco", &["vida", "MODELO", "Sulco Inicial"]);
        let spec = ColumnSpec::required(&["Modelo (Atual)", "Modelo"]);
        assert_eq!(find_column(&sheet, &spec).unwrap(), Some(1));
    }

    #[test]
    fn test_required_column_missing_is_an_error() {
        let sheet = sheet("pneus", &["Referência"]);
        let err = find_column(&sheet, &ColumnSpec::required(&["Vida"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "required column 'Vida' not found in sheet 'pneus'"
        );
        assert_eq!(find_column(&sheet, &ColumnSpec::optional(&["Status"])).unwrap(), None);
    }

    #[test]
    fn test_inventory_layout_with_default_columns() {
        let sheet = sheet(
            "pneus",
            &["Referência", "Modelo (Atual)", "Vida", "Aferição - Sulco", "Observação"],
        );
        let layout = InventoryLayout::resolve(&sheet, &InventoryColumns::default()).unwrap();
        assert_eq!(layout.model, Some(1));
        assert_eq!(layout.measured_tread, Some(3));
        assert_eq!(layout.observation, Some(4));
        assert_eq!(layout.status, None);
    }
}
