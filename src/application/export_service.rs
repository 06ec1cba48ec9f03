// Export service - Use case for downloading the (filtered) enriched table
use crate::application::error::PipelineError;
use crate::application::export::{ExportFilter, filtered_rows, table_columns};
use crate::application::pipeline::TirePipeline;
use crate::application::spreadsheet_reader::SpreadsheetReader;
use crate::infrastructure::csv_export::write_csv;
use std::sync::Arc;

#[derive(Clone)]
pub struct ExportService {
    reader: Arc<dyn SpreadsheetReader>,
    pipeline: Arc<TirePipeline>,
}

impl ExportService {
    pub fn new(reader: Arc<dyn SpreadsheetReader>, pipeline: Arc<TirePipeline>) -> Self {
        Self { reader, pipeline }
    }

    pub fn export_csv(&self, bytes: &[u8], filter: &ExportFilter) -> Result<Vec<u8>, PipelineError> {
        let workbook = self.reader.read_workbook(bytes)?;
        let output = self.pipeline.run(&workbook)?;

        let rows = filtered_rows(&output, filter);
        tracing::debug!(
            "Exporting {} of {} records with filter {:?}",
            rows.len(),
            output.records.len(),
            filter
        );

        write_csv(&table_columns(&output), &rows).map_err(|e| PipelineError::Export(e.to_string()))
    }
}
