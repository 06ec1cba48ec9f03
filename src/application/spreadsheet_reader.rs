// Spreadsheet reader trait - turns uploaded bytes into an in-memory workbook
use crate::application::error::PipelineError;
use crate::domain::workbook::Workbook;

pub trait SpreadsheetReader: Send + Sync {
    /// Parse every sheet of the uploaded file. Unreadable input is `PipelineError::Unreadable`.
    fn read_workbook(&self, bytes: &[u8]) -> Result<Workbook, PipelineError>;
}
