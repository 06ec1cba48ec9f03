// Spreadsheet reader backed by calamine (xlsx, xls, xlsb, ods)
use crate::application::error::PipelineError;
use crate::application::spreadsheet_reader::SpreadsheetReader;
use crate::domain::workbook::{CellValue, Sheet, Workbook};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

#[derive(Debug, Clone, Default)]
pub struct CalamineReader;

impl CalamineReader {
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetReader for CalamineReader {
    fn read_workbook(&self, bytes: &[u8]) -> Result<Workbook, PipelineError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| PipelineError::Unreadable(e.to_string()))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| PipelineError::Unreadable(format!("sheet '{}': {}", name, e)))?;
            let rows: Vec<Vec<CellValue>> = range
                .rows()
                .map(|row| row.iter().map(to_cell).collect())
                .collect();

            tracing::debug!("Read sheet '{}' with {} rows", name, rows.len());
            sheets.push(sheet_from_rows(name, rows));
        }

        Ok(Workbook::new(sheets))
    }
}

/// First row is the header; the rest are data rows.
fn sheet_from_rows(name: String, mut rows: Vec<Vec<CellValue>>) -> Sheet {
    if rows.is_empty() {
        return Sheet::new(name, Vec::new(), Vec::new());
    }
    let header = rows
        .remove(0)
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    Sheet::new(name, header, rows)
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial day number, as the sheet stores it
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}
