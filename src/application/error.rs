// Structural failures that stop the pipeline for one upload
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("could not read spreadsheet: {0}")]
    Unreadable(String),

    #[error("sheet '{expected}' not found (available sheets: {})", .available.join(", "))]
    MissingSheet {
        expected: String,
        available: Vec<String>,
    },

    #[error("required column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to export table: {0}")]
    Export(String),
}

impl PipelineError {
    /// Problems with the uploaded file rather than with the service.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Unreadable(_)
                | PipelineError::MissingSheet { .. }
                | PipelineError::MissingColumn { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sheet_message_lists_available_sheets() {
        let err = PipelineError::MissingSheet {
            expected: "sulco".to_string(),
            available: vec!["pneus".to_string(), "posição".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "sheet 'sulco' not found (available sheets: pneus, posição)"
        );
        assert!(err.is_input_error());
        assert!(!PipelineError::Export("disk".to_string()).is_input_error());
    }
}
