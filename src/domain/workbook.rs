// In-memory spreadsheet model handed over by the spreadsheet parser
use std::fmt;

/// A single spreadsheet cell after parsing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One worksheet: the first spreadsheet row is kept as `header`.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// Cell at `(row, column)`, treating short rows as padded with empty cells.
    pub fn cell<'a>(row: &'a [CellValue], column: Option<usize>) -> &'a CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        column.and_then(|idx| row.get(idx)).unwrap_or(EMPTY)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display_keeps_source_rendering() {
        assert_eq!(CellValue::Number(100000.0).to_string(), "100000");
        assert_eq!(CellValue::Number(5.5).to_string(), "5.5");
        assert_eq!(CellValue::text("5,0").to_string(), "5,0");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let row = vec![CellValue::text("a")];
        assert_eq!(Sheet::cell(&row, Some(0)), &CellValue::text("a"));
        assert_eq!(Sheet::cell(&row, Some(3)), &CellValue::Empty);
        assert_eq!(Sheet::cell(&row, None), &CellValue::Empty);
    }

    #[test]
    fn test_blank_cells() {
        assert!(CellValue::text("   ").is_blank());
        assert!(CellValue::Empty.is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }
}
